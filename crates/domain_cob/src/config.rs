//! Detection configuration
//!
//! Confidence tiers, recovery multipliers, age bands and balance thresholds
//! are operational settings rather than regulation. Defaults reproduce the
//! standard catalog; deployments can override any of them from a file or
//! from `COB__<RULE>__<FIELD>` environment variables.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

use core_kernel::Rate;
use crate::error::CobError;

/// R001 Medicare Secondary Payer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MspConfig {
    pub commercial_employed_confidence: Decimal,
    pub commercial_confidence: Decimal,
    pub under_medicare_age_employed_confidence: Decimal,
    pub working_senior_confidence: Decimal,
    /// Age at which Medicare entitlement by age begins
    pub medicare_age: u32,
    /// Oldest age still treated as a working senior
    pub working_senior_max_age: u32,
    pub recovery_rate: Rate,
}

impl Default for MspConfig {
    fn default() -> Self {
        Self {
            commercial_employed_confidence: dec!(0.95),
            commercial_confidence: dec!(0.90),
            under_medicare_age_employed_confidence: dec!(0.80),
            working_senior_confidence: dec!(0.75),
            medicare_age: 65,
            working_senior_max_age: 70,
            recovery_rate: Rate::new(dec!(0.8)),
        }
    }
}

/// R002 wrong primary order settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrongPrimaryConfig {
    pub confidence: Decimal,
    pub recovery_rate: Rate,
}

impl Default for WrongPrimaryConfig {
    fn default() -> Self {
        Self {
            confidence: dec!(0.90),
            recovery_rate: Rate::new(dec!(0.75)),
        }
    }
}

/// R003 missing secondary settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingSecondaryConfig {
    pub spouse_employed_confidence: Decimal,
    pub high_responsibility_confidence: Decimal,
    /// Share of billed charges above which patient responsibility is high
    pub responsibility_threshold: Rate,
    pub recovery_rate: Rate,
}

impl Default for MissingSecondaryConfig {
    fn default() -> Self {
        Self {
            spouse_employed_confidence: dec!(0.70),
            high_responsibility_confidence: dec!(0.50),
            responsibility_threshold: Rate::new(dec!(0.20)),
            recovery_rate: Rate::new(dec!(0.5)),
        }
    }
}

/// R004 dependent age-out settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeOutConfig {
    pub confidence: Decimal,
    /// Patient age band at service (inclusive)
    pub min_service_age: u32,
    pub max_service_age: u32,
    /// Age band at coverage termination (inclusive)
    pub min_termination_age: u32,
    pub max_termination_age: u32,
    pub recovery_rate: Rate,
}

impl Default for AgeOutConfig {
    fn default() -> Self {
        Self {
            confidence: dec!(0.95),
            min_service_age: 25,
            max_service_age: 27,
            min_termination_age: 25,
            max_termination_age: 26,
            recovery_rate: Rate::new(dec!(0.8)),
        }
    }
}

/// R005 auto/liability settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoLiabilityConfig {
    pub auto_on_file_confidence: Decimal,
    pub confidence: Decimal,
    pub recovery_rate: Rate,
}

impl Default for AutoLiabilityConfig {
    fn default() -> Self {
        Self {
            auto_on_file_confidence: dec!(0.85),
            confidence: dec!(0.70),
            recovery_rate: Rate::full(),
        }
    }
}

/// R006 workers compensation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkersCompConfig {
    pub confidence: Decimal,
    pub recovery_rate: Rate,
}

impl Default for WorkersCompConfig {
    fn default() -> Self {
        Self {
            confidence: dec!(0.90),
            recovery_rate: Rate::full(),
        }
    }
}

/// R007 coordination period settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoveragePeriodConfig {
    pub confidence: Decimal,
    pub recovery_rate: Rate,
}

impl Default for CoveragePeriodConfig {
    fn default() -> Self {
        Self {
            confidence: dec!(0.95),
            recovery_rate: Rate::new(dec!(0.75)),
        }
    }
}

/// R008 dual coverage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DualCoverageConfig {
    pub confidence: Decimal,
    /// Remaining balance that must be exceeded to raise an alert
    pub min_balance: Decimal,
    pub recovery_rate: Rate,
}

impl Default for DualCoverageConfig {
    fn default() -> Self {
        Self {
            confidence: dec!(0.80),
            min_balance: dec!(100),
            recovery_rate: Rate::new(dec!(0.6)),
        }
    }
}

/// Settings for the full rule catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub msp: MspConfig,
    pub wrong_primary: WrongPrimaryConfig,
    pub missing_secondary: MissingSecondaryConfig,
    pub age_out: AgeOutConfig,
    pub auto_liability: AutoLiabilityConfig,
    pub workers_comp: WorkersCompConfig,
    pub coverage_period: CoveragePeriodConfig,
    pub dual_coverage: DualCoverageConfig,
}

impl DetectionConfig {
    /// Loads configuration from environment variables prefixed `COB`
    pub fn from_env() -> Result<Self, CobError> {
        Self::load(None)
    }

    /// Loads configuration from an optional file, then the environment
    ///
    /// Environment variables take precedence over the file.
    pub fn load(path: Option<&Path>) -> Result<Self, CobError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let loaded: DetectionConfig = builder
            .add_source(
                config::Environment::with_prefix("COB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        tracing::debug!(?loaded, "detection configuration loaded");
        Ok(loaded)
    }

    /// Parses configuration from a TOML document
    pub fn from_toml_str(document: &str) -> Result<Self, CobError> {
        let loaded: DetectionConfig = config::Config::builder()
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks that confidences lie in [0, 1], rates and thresholds are
    /// non-negative and age bands are ordered
    pub fn validate(&self) -> Result<(), CobError> {
        let confidences = [
            ("msp.commercial_employed_confidence", self.msp.commercial_employed_confidence),
            ("msp.commercial_confidence", self.msp.commercial_confidence),
            (
                "msp.under_medicare_age_employed_confidence",
                self.msp.under_medicare_age_employed_confidence,
            ),
            ("msp.working_senior_confidence", self.msp.working_senior_confidence),
            ("wrong_primary.confidence", self.wrong_primary.confidence),
            (
                "missing_secondary.spouse_employed_confidence",
                self.missing_secondary.spouse_employed_confidence,
            ),
            (
                "missing_secondary.high_responsibility_confidence",
                self.missing_secondary.high_responsibility_confidence,
            ),
            ("age_out.confidence", self.age_out.confidence),
            ("auto_liability.auto_on_file_confidence", self.auto_liability.auto_on_file_confidence),
            ("auto_liability.confidence", self.auto_liability.confidence),
            ("workers_comp.confidence", self.workers_comp.confidence),
            ("coverage_period.confidence", self.coverage_period.confidence),
            ("dual_coverage.confidence", self.dual_coverage.confidence),
        ];
        for (name, value) in confidences {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(CobError::invalid_configuration(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("msp.recovery_rate", self.msp.recovery_rate.as_decimal()),
            ("wrong_primary.recovery_rate", self.wrong_primary.recovery_rate.as_decimal()),
            (
                "missing_secondary.responsibility_threshold",
                self.missing_secondary.responsibility_threshold.as_decimal(),
            ),
            ("missing_secondary.recovery_rate", self.missing_secondary.recovery_rate.as_decimal()),
            ("age_out.recovery_rate", self.age_out.recovery_rate.as_decimal()),
            ("auto_liability.recovery_rate", self.auto_liability.recovery_rate.as_decimal()),
            ("workers_comp.recovery_rate", self.workers_comp.recovery_rate.as_decimal()),
            ("coverage_period.recovery_rate", self.coverage_period.recovery_rate.as_decimal()),
            ("dual_coverage.min_balance", self.dual_coverage.min_balance),
            ("dual_coverage.recovery_rate", self.dual_coverage.recovery_rate.as_decimal()),
        ];
        for (name, value) in non_negative {
            if value < Decimal::ZERO {
                return Err(CobError::invalid_configuration(format!(
                    "{} must not be negative, got {}",
                    name, value
                )));
            }
        }

        if self.msp.working_senior_max_age < self.msp.medicare_age {
            return Err(CobError::invalid_configuration(
                "msp.working_senior_max_age must not be below msp.medicare_age",
            ));
        }
        if self.age_out.max_service_age < self.age_out.min_service_age
            || self.age_out.max_termination_age < self.age_out.min_termination_age
        {
            return Err(CobError::invalid_configuration(
                "age_out bands must have min not above max",
            ));
        }

        Ok(())
    }
}
