use crate::trade::TradeDraft;
use crate::types::Property;

/// Local interaction state. Selection and draft live inside the mode that
/// owns them, so leaving a mode drops them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiContext {
    #[default]
    Normal,
    Manage {
        selected: Option<Property>,
    },
    Trade(TradeDraft),
}

impl UiContext {
    pub fn mode_name(&self) -> &'static str {
        match self {
            UiContext::Normal => "normal",
            UiContext::Manage { .. } => "manage",
            UiContext::Trade(_) => "trade",
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, UiContext::Normal)
    }

    pub fn selected(&self) -> Option<Property> {
        match self {
            UiContext::Manage { selected } => *selected,
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&TradeDraft> {
        match self {
            UiContext::Trade(draft) => Some(draft),
            _ => None,
        }
    }
}
