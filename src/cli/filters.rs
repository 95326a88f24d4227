//! Filter enums for CLI commands

use clap::ValueEnum;

use crate::core::params::ParamType;

/// Parameter type filter for `lce params`
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ParamTypeFilter {
    /// Input parameters only (valid X axes)
    Input,
    /// Output parameters only (valid Y axes)
    Output,
    /// All parameters - default
    #[default]
    All,
}

impl ParamTypeFilter {
    /// Check if a parameter type matches this filter
    pub fn matches(&self, param_type: ParamType) -> bool {
        match self {
            ParamTypeFilter::Input => param_type == ParamType::Input,
            ParamTypeFilter::Output => param_type == ParamType::Output,
            ParamTypeFilter::All => true,
        }
    }
}

impl std::fmt::Display for ParamTypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamTypeFilter::Input => write!(f, "input"),
            ParamTypeFilter::Output => write!(f, "output"),
            ParamTypeFilter::All => write!(f, "all"),
        }
    }
}
