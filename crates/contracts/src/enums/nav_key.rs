//! Клавиши навигации по вкладкам

/// Клавиша, которую обрабатывает список вкладок.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Up,
    Right,
    Down,
    Home,
    End,
}

impl NavKey {
    /// Распознаёт `KeyboardEvent.key`, включая старые имена (`Left`, `Up`, ...)
    /// из ранних версий Edge/IE.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "Left" => Some(NavKey::Left),
            "ArrowUp" | "Up" => Some(NavKey::Up),
            "ArrowRight" | "Right" => Some(NavKey::Right),
            "ArrowDown" | "Down" => Some(NavKey::Down),
            "Home" => Some(NavKey::Home),
            "End" => Some(NavKey::End),
            _ => None,
        }
    }

    /// Распознаёт устаревший `KeyboardEvent.keyCode`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            37 => Some(NavKey::Left),
            38 => Some(NavKey::Up),
            39 => Some(NavKey::Right),
            40 => Some(NavKey::Down),
            36 => Some(NavKey::Home),
            35 => Some(NavKey::End),
            _ => None,
        }
    }

    /// `key` has priority; `key_code` is consulted only when `key` is unknown.
    pub fn resolve(key: &str, key_code: u32) -> Option<Self> {
        Self::from_key(key).or_else(|| Self::from_key_code(key_code))
    }
}
