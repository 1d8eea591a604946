use thiserror::Error;

use crate::particle::PointId;

#[derive(Error, Debug)]
pub enum ClothError {
	#[error("point {0:?} was removed or never belonged to this world")]
	StalePoint(PointId),
	#[error("invalid config value for `{field}`: {reason}")]
	InvalidConfig { field: &'static str, reason: String },
	#[error("failed to parse settings: {0}")]
	Toml(#[from] toml::de::Error),
}
