/// ARIA роли, которые использует виджет вкладок
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    TabList,
    Tab,
    TabPanel,
}

impl Role {
    /// Значение атрибута `role`
    pub fn code(&self) -> &'static str {
        match self {
            Role::TabList => "tablist",
            Role::Tab => "tab",
            Role::TabPanel => "tabpanel",
        }
    }

    /// Парсинг из значения атрибута `role`
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "tablist" => Some(Role::TabList),
            "tab" => Some(Role::Tab),
            "tabpanel" => Some(Role::TabPanel),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
