//! Which sheets the macros touch and how the master header looks.

use faixa_model::OutputSchema;
use faixa_store::{SheetNames, WorkbookConfig};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroSettings {
    pub sheets: SheetNames,
    pub schema: OutputSchema,
}

impl From<&WorkbookConfig> for MacroSettings {
    fn from(config: &WorkbookConfig) -> Self {
        Self {
            sheets: config.sheets.clone(),
            schema: config.schema,
        }
    }
}
