use crate::domain::model::EmployeeRecord;
use crate::domain::ports::EmployeeCodec;
use crate::utils::error::Result;

#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl EmployeeCodec for JsonCodec {
    fn encode(&self, records: &[EmployeeRecord]) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(records)?
        } else {
            serde_json::to_string(records)?
        };
        Ok(output)
    }

    /// 接受單一物件或陣列
    fn decode(&self, input: &str) -> Result<Vec<EmployeeRecord>> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        let records = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };
        Ok(records)
    }
}
