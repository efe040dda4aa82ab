//! TOML description of a combined interpolator-extrapolator.
//!
//! ```toml
//! interpolator = "NaturalCubicSpline"
//! left_extrapolator = "LinearExtrapolator"
//! right_extrapolator = "FlatExtrapolator"
//! left_boundary = { type = "clamped", gradient = 0.5 }
//! ```
//!
//! Names resolve through [`CombinedInterpolatorExtrapolatorFactory`]; both
//! extrapolator keys are optional. Boundary keys apply to the cubic spline
//! families only and default to natural.

use super::factory::{
    CombinedInterpolatorExtrapolatorFactory, Interpolator1DFactory, EXTRAPOLATOR_NAMES,
};
use super::{
    CombinedInterpolatorExtrapolator, Interpolator1D,
    MonotonicityPreservingCubicSplineInterpolator1D, NaturalCubicSplineInterpolator1D,
    SplineBoundary,
};
use crate::types::{InterpolationError, InterpolationResult};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

/// Named interpolator with optional named extrapolators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpolatorConfig {
    /// Canonical interpolator name, e.g. `"Linear"`.
    pub interpolator: String,
    /// Extrapolator below the data.
    #[serde(default)]
    pub left_extrapolator: Option<String>,
    /// Extrapolator above the data.
    #[serde(default)]
    pub right_extrapolator: Option<String>,
    /// End condition at the first node of a cubic spline.
    #[serde(default)]
    pub left_boundary: Option<SplineBoundary>,
    /// End condition at the last node of a cubic spline.
    #[serde(default)]
    pub right_boundary: Option<SplineBoundary>,
}

impl InterpolatorConfig {
    /// Config without extrapolators.
    pub fn new(interpolator: impl Into<String>) -> Self {
        Self {
            interpolator: interpolator.into(),
            left_extrapolator: None,
            right_extrapolator: None,
            left_boundary: None,
            right_boundary: None,
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> InterpolationResult<Self> {
        let config: InterpolatorConfig = toml::from_str(content)
            .map_err(|e| InterpolationError::invalid(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> InterpolationResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            InterpolationError::invalid(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Check every name against the registries and the boundaries against
    /// the interpolator.
    pub fn validate(&self) -> InterpolationResult<()> {
        self.resolve_interpolator()?;
        for name in [&self.left_extrapolator, &self.right_extrapolator]
            .into_iter()
            .flatten()
        {
            if !EXTRAPOLATOR_NAMES.contains(&name.as_str()) {
                return Err(InterpolationError::invalid(format!(
                    "unknown extrapolator name '{}'",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Resolve the names into a combined interpolator.
    pub fn build(&self) -> InterpolationResult<CombinedInterpolatorExtrapolator> {
        CombinedInterpolatorExtrapolatorFactory::from_interpolator(
            self.resolve_interpolator()?,
            self.left_extrapolator.as_deref(),
            self.right_extrapolator.as_deref(),
        )
    }

    fn resolve_interpolator(&self) -> InterpolationResult<Arc<dyn Interpolator1D>> {
        if self.interpolator.trim().is_empty() {
            return Err(InterpolationError::invalid("interpolator name is missing"));
        }
        if self.left_boundary.is_none() && self.right_boundary.is_none() {
            return Interpolator1DFactory::get_interpolator(&self.interpolator);
        }
        let left = self.left_boundary.unwrap_or_default();
        let right = self.right_boundary.unwrap_or_default();
        match self.interpolator.as_str() {
            "NaturalCubicSpline" => Ok(Arc::new(NaturalCubicSplineInterpolator1D::new(left, right)?)),
            "MonotonicityPreservingCubicSpline" => Ok(Arc::new(
                MonotonicityPreservingCubicSplineInterpolator1D::new(left, right)?,
            )),
            other => {
                // Surface unknown names before the boundary mismatch
                Interpolator1DFactory::get_interpolator(other)?;
                Err(InterpolationError::invalid(format!(
                    "spline boundaries do not apply to interpolator '{}'",
                    other
                )))
            }
        }
    }
}
