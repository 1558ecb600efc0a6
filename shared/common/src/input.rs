use serde::Deserialize;

/// Keys handled by the game itself rather than the car
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GameKey {
    Exit,
    Restart,
}

/// Arrow keys driving the car
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
pub enum DriveKey {
    Left,
    Right,
    Up,
    Down,
}

/// The accumulator a [DriveKey] adjusts
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DriveAxis {
    Steering,
    Throttle,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum KeyAction {
    Game(GameKey),
    Drive(DriveKey),
}

impl DriveKey {
    pub fn axis(self) -> DriveAxis {
        match self {
            DriveKey::Left | DriveKey::Right => DriveAxis::Steering,
            DriveKey::Up | DriveKey::Down => DriveAxis::Throttle,
        }
    }

    /// Delta applied to the axis accumulator each time its repeat timer fires
    pub fn delta(self) -> i32 {
        match self {
            DriveKey::Left | DriveKey::Down => -1,
            DriveKey::Right | DriveKey::Up => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes() {
        assert_eq!(DriveKey::Left.axis(), DriveAxis::Steering);
        assert_eq!(DriveKey::Right.axis(), DriveAxis::Steering);
        assert_eq!(DriveKey::Up.axis(), DriveAxis::Throttle);
        assert_eq!(DriveKey::Down.axis(), DriveAxis::Throttle);

        assert_eq!(DriveKey::Left.delta(), -DriveKey::Right.delta());
        assert_eq!(DriveKey::Down.delta(), -DriveKey::Up.delta());
    }
}
