use std::sync::Arc;

use ncufoodmap_core::application::NcuFoodMapService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NcuFoodMapService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NcuFoodMapService) -> Self {
        Self { args, service }
    }
}
