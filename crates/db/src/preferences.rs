use crate::Db;
use crate::error::Result;

pub const MODEL_KEY: &str = "ai-model";
pub const REGION_KEY: &str = "ai-region";

// Identifiers are stored raw; callers decide how to handle values they no
// longer recognise.
impl Db {
    pub fn get_model_preference(&self) -> Result<Option<String>> {
        self.get_setting(MODEL_KEY)
    }

    pub fn set_model_preference(&self, model: &str) -> Result<()> {
        self.set_setting(MODEL_KEY, model)
    }

    pub fn get_region_preference(&self) -> Result<Option<String>> {
        self.get_setting(REGION_KEY)
    }

    pub fn set_region_preference(&self, region: &str) -> Result<()> {
        self.set_setting(REGION_KEY, region)
    }
}
