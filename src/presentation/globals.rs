use crate::application::ChartConfig;
use crate::domain::{
    chart::TooltipState,
    market_data::{Company, Month, Selection},
};
use leptos::*;
use once_cell::sync::OnceCell;

pub struct Globals {
    pub config: ChartConfig,
    pub company: RwSignal<Company>,
    pub month: RwSignal<Month>,
    pub tooltip: RwSignal<TooltipState>,
    pub status: RwSignal<String>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

/// Install the config the UI starts from. Ignored once `globals()` has run.
pub fn init_globals(config: ChartConfig) {
    let _ = GLOBALS.set(Globals::new(config));
}

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals::new(ChartConfig::default()))
}

impl Globals {
    fn new(config: ChartConfig) -> Self {
        let Selection { company, month } = config.default_selection.clone();
        Self {
            config,
            company: create_rw_signal(company),
            month: create_rw_signal(month),
            tooltip: create_rw_signal(TooltipState::hidden()),
            status: create_rw_signal("Waiting for data".to_string()),
        }
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.company.get_untracked(), self.month.get_untracked())
    }
}
