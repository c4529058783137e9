use thiserror::Error;

/// Ошибки машины состояний списка вкладок
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabsError {
    /// The tab has no linked panel among the distributed panels.
    #[error("panel for tab #{tab_id} does not exist")]
    PanelNotFound { tab_id: String },

    #[error("tab selection requested while another selection is in progress")]
    Reentrant,
}
