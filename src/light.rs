/// The state of a traffic light movement.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum LightState {
    Red,
    Yellow,
    Green,
}

impl LightState {
    /// Interprets one character of a controller's state string.
    ///
    /// Upper-case (priority) and lower-case states are treated alike.
    /// Any other character, such as `o` (off) or `s` (stop), has no light state.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'r' => Some(Self::Red),
            'y' => Some(Self::Yellow),
            'g' => Some(Self::Green),
            _ => None,
        }
    }

    /// Interprets every character of a state string, in order.
    pub fn parse_all(state: &str) -> Vec<Option<Self>> {
        state.chars().map(Self::from_char).collect()
    }
}

#[cfg(test)]
mod test {
    use super::LightState::{self, *};

    #[test]
    fn state_characters() {
        assert_eq!(LightState::from_char('r'), Some(Red));
        assert_eq!(LightState::from_char('Y'), Some(Yellow));
        assert_eq!(LightState::from_char('G'), Some(Green));
        assert_eq!(LightState::from_char('o'), None);
        assert_eq!(LightState::from_char('s'), None);
    }

    #[test]
    fn state_string() {
        assert_eq!(
            LightState::parse_all("GrYu"),
            vec![Some(Green), Some(Red), Some(Yellow), None]
        );
        assert!(LightState::parse_all("").is_empty());
    }
}
