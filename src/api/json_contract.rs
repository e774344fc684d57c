use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

use super::SceneConfig;

pub const SCENE_CONFIG_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: SceneConfig,
}

impl SceneConfig {
    pub fn to_json_contract_v1_pretty(self) -> SceneResult<String> {
        let payload = SceneConfigJsonContractV1 {
            schema_version: SCENE_CONFIG_JSON_SCHEMA_V1,
            config: self,
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            SceneError::InvalidConfig(format!("failed to serialize scene config contract v1: {e}"))
        })
    }

    /// Accepts either a bare config object or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> SceneResult<Self> {
        if let Ok(config) = serde_json::from_str::<Self>(input) {
            config.validate()?;
            return Ok(config);
        }
        let payload: SceneConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            SceneError::InvalidConfig(format!("failed to parse scene config json payload: {e}"))
        })?;
        if payload.schema_version != SCENE_CONFIG_JSON_SCHEMA_V1 {
            return Err(SceneError::InvalidConfig(format!(
                "unsupported scene config schema version: {}",
                payload.schema_version
            )));
        }
        payload.config.validate()?;
        Ok(payload.config)
    }
}

#[cfg(test)]
mod tests {
    use super::SCENE_CONFIG_JSON_SCHEMA_V1;
    use crate::api::SceneConfig;
    use crate::core::Easing;

    #[test]
    fn contract_round_trips_through_json() {
        let config = SceneConfig::new(800.0, 600.0).with_default_easing(Easing::QuadOut);
        let json = config.to_json_contract_v1_pretty().expect("serialize");
        assert!(json.contains(&format!("\"schema_version\": {SCENE_CONFIG_JSON_SCHEMA_V1}")));
        let parsed = SceneConfig::from_json_compat_str(&json).expect("parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn bare_config_uses_serde_defaults() {
        let parsed =
            SceneConfig::from_json_compat_str(r#"{"surface_width": 300, "surface_height": 200}"#)
                .expect("parse bare config");
        assert_eq!(parsed, SceneConfig::new(300.0, 200.0));
    }

    #[test]
    fn unsupported_versions_and_bad_surfaces_are_rejected() {
        let future = r#"{"schema_version": 9, "config": {"surface_width": 1, "surface_height": 1}}"#;
        assert!(SceneConfig::from_json_compat_str(future).is_err());
        let degenerate = r#"{"surface_width": 0, "surface_height": 10}"#;
        assert!(SceneConfig::from_json_compat_str(degenerate).is_err());
    }
}
