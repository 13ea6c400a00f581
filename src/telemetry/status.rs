use crate::models::Status;

/// Presentation color family for a status. The theme maps these to actual colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Danger,
    Warning,
    Neutral,
}

/// Normalized view of a raw status: a display token plus its color family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub token: &'static str,
    pub color: StatusColor,
}

/// Map a status to its token and color. Never fails; unrecognized
/// statuses fall through to the neutral branch.
pub fn classify(status: &Status) -> Classification {
    let (token, color) = match status {
        Status::Normal => ("NORMAL", StatusColor::Success),
        Status::Anomaly => ("ANOMALY", StatusColor::Danger),
        Status::Waiting => ("WAITING", StatusColor::Warning),
        Status::Error => ("ERROR", StatusColor::Danger),
        Status::Other(_) => ("UNKNOWN", StatusColor::Neutral),
    };
    Classification { token, color }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_map_to_their_colors() {
        assert_eq!(classify(&Status::Normal).color, StatusColor::Success);
        assert_eq!(classify(&Status::Anomaly).color, StatusColor::Danger);
        assert_eq!(classify(&Status::Waiting).color, StatusColor::Warning);
        assert_eq!(classify(&Status::Error).color, StatusColor::Danger);
    }

    #[test]
    fn unknown_status_is_neutral() {
        let c = classify(&Status::from("REBOOTING"));
        assert_eq!(c.token, "UNKNOWN");
        assert_eq!(c.color, StatusColor::Neutral);

        // Lower-case variants of known statuses are not recognized.
        assert_eq!(classify(&Status::from("anomaly")).color, StatusColor::Neutral);
    }

    #[test]
    fn token_matches_status_name() {
        for raw in ["NORMAL", "ANOMALY", "WAITING", "ERROR"] {
            assert_eq!(classify(&Status::from(raw)).token, raw);
        }
    }
}
