//! Natural-language explanations of a zone's assessment.
//!
//! [`TextExplainer`] has a single operation. [`TemplateExplainer`] is
//! deterministic and always available; the remote providers in [`remote`]
//! are wrapped in a [`FallbackExplainer`] so a provider failure degrades to
//! the template text instead of reaching the user.

pub mod remote;

pub use remote::{Credentials, GeminiExplainer, OpenAiExplainer};

use crate::config::{ExplainerConfig, ExplainerProvider};
use crate::core::{Error, Result, ZoneRecord};
use crate::risk::RiskLevel;
use serde::Serialize;

/// The fields an explainer may use.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplanationRequest {
    pub zone: String,
    pub aqi: f64,
    pub waste_index: f64,
    pub stress_score: f64,
    pub risk_level: RiskLevel,
}

impl ExplanationRequest {
    /// Build from an assessed record; unassessed records are rejected.
    pub fn from_record(record: &ZoneRecord) -> Result<Self> {
        match (record.stress_score, record.risk_level) {
            (Some(stress_score), Some(risk_level)) => Ok(Self {
                zone: record.zone.clone(),
                aqi: record.aqi,
                waste_index: record.waste_index,
                stress_score,
                risk_level,
            }),
            _ => Err(Error::Validation(format!(
                "zone '{}' has not been assessed yet",
                record.zone
            ))),
        }
    }

    /// Prompt shared by the remote providers.
    pub fn prompt(&self) -> String {
        format!(
            "Analyze the environmental stress for {}:\n\
             - Air Quality Index: {}\n\
             - Waste Index: {}\n\
             - Stress Score: {:.2}\n\
             - Risk Level: {}\n\n\
             Provide a brief explanation (2-3 sentences) of the environmental conditions \
             and their implications for residents.",
            self.zone, self.aqi, self.waste_index, self.stress_score, self.risk_level
        )
    }
}

pub trait TextExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String>;

    /// Short provider name for logs and reports.
    fn provider(&self) -> &str {
        "custom"
    }
}

impl<T: TextExplainer + ?Sized> TextExplainer for Box<T> {
    fn explain(&self, request: &ExplanationRequest) -> Result<String> {
        (**self).explain(request)
    }

    fn provider(&self) -> &str {
        (**self).provider()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateExplainer;

impl TemplateExplainer {
    pub fn render(request: &ExplanationRequest) -> String {
        format!(
            "{} has a {} risk level with a stress score of {:.2}. \
             The Air Quality Index is {:.0} and waste management index is {:.0}. {}",
            request.zone,
            request.risk_level,
            request.stress_score,
            request.aqi,
            request.waste_index,
            request.risk_level.recommendation()
        )
    }
}

impl TextExplainer for TemplateExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String> {
        Ok(Self::render(request))
    }

    fn provider(&self) -> &str {
        "template"
    }
}

/// Wraps a primary explainer; any error or blank answer yields template text.
pub struct FallbackExplainer<E> {
    primary: E,
}

impl<E: TextExplainer> FallbackExplainer<E> {
    pub fn new(primary: E) -> Self {
        Self { primary }
    }
}

impl<E: TextExplainer> TextExplainer for FallbackExplainer<E> {
    fn explain(&self, request: &ExplanationRequest) -> Result<String> {
        match self.primary.explain(request) {
            Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            Ok(_) => {
                log::warn!(
                    "{} returned an empty explanation; using template",
                    self.primary.provider()
                );
                Ok(TemplateExplainer::render(request))
            }
            Err(e) => {
                log::warn!(
                    "{} explanation failed: {}; using template",
                    self.primary.provider(),
                    e
                );
                Ok(TemplateExplainer::render(request))
            }
        }
    }

    fn provider(&self) -> &str {
        self.primary.provider()
    }
}

/// Pick an explainer from configuration and available credentials.
///
/// With `provider = "auto"` Gemini wins when its key is present, then OpenAI,
/// then the template. A named provider without its key falls back to the
/// template. The result never surfaces provider errors.
pub fn select_explainer(
    config: &ExplainerConfig,
    credentials: &Credentials,
) -> Box<dyn TextExplainer> {
    let gemini = || {
        credentials
            .gemini_api_key
            .clone()
            .map(|key| Box::new(GeminiExplainer::new(key, config)) as Box<dyn TextExplainer>)
    };
    let openai = || {
        credentials
            .openai_api_key
            .clone()
            .map(|key| Box::new(OpenAiExplainer::new(key, config)) as Box<dyn TextExplainer>)
    };

    let primary = match config.provider {
        ExplainerProvider::Auto => gemini().or_else(openai),
        ExplainerProvider::Gemini => gemini(),
        ExplainerProvider::OpenAi => openai(),
        ExplainerProvider::Template => None,
    };

    match primary {
        Some(explainer) => {
            log::debug!("using {} explainer", explainer.provider());
            Box::new(FallbackExplainer::new(explainer))
        }
        None => {
            if config.provider != ExplainerProvider::Template
                && config.provider != ExplainerProvider::Auto
            {
                log::warn!(
                    "{:?} explainer selected but no API key is set; using template",
                    config.provider
                );
            }
            Box::new(TemplateExplainer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn request(risk_level: RiskLevel) -> ExplanationRequest {
        ExplanationRequest {
            zone: "Zone A".to_string(),
            aqi: 187.4,
            waste_index: 62.0,
            stress_score: 0.7234,
            risk_level,
        }
    }

    struct FailingExplainer;

    impl TextExplainer for FailingExplainer {
        fn explain(&self, _request: &ExplanationRequest) -> Result<String> {
            Err(Error::Explainer("timed out".to_string()))
        }

        fn provider(&self) -> &str {
            "failing"
        }
    }

    struct BlankExplainer;

    impl TextExplainer for BlankExplainer {
        fn explain(&self, _request: &ExplanationRequest) -> Result<String> {
            Ok("   ".to_string())
        }
    }

    struct CannedExplainer;

    impl TextExplainer for CannedExplainer {
        fn explain(&self, _request: &ExplanationRequest) -> Result<String> {
            Ok("  Air is poor.\n".to_string())
        }
    }

    #[test]
    fn test_template_text_is_deterministic() {
        let text = TemplateExplainer.explain(&request(RiskLevel::High)).unwrap();
        assert_eq!(
            text,
            "Zone A has a High risk level with a stress score of 0.72. \
             The Air Quality Index is 187 and waste management index is 62. \
             Immediate intervention is recommended to address elevated pollution and waste levels."
        );
        assert_eq!(text, TemplateExplainer.explain(&request(RiskLevel::High)).unwrap());
    }

    #[test]
    fn test_template_sentence_per_level() {
        for level in RiskLevel::ALL {
            let text = TemplateExplainer::render(&request(level));
            assert!(text.ends_with(level.recommendation()));
        }
    }

    #[test]
    fn test_fallback_on_error_uses_template() {
        let explainer = FallbackExplainer::new(FailingExplainer);
        let text = explainer.explain(&request(RiskLevel::Moderate)).unwrap();
        assert_eq!(text, TemplateExplainer::render(&request(RiskLevel::Moderate)));
    }

    #[test]
    fn test_fallback_on_blank_answer_uses_template() {
        let explainer = FallbackExplainer::new(BlankExplainer);
        let text = explainer.explain(&request(RiskLevel::Low)).unwrap();
        assert_eq!(text, TemplateExplainer::render(&request(RiskLevel::Low)));
    }

    #[test]
    fn test_fallback_passes_through_primary_text() {
        let explainer = FallbackExplainer::new(CannedExplainer);
        assert_eq!(explainer.explain(&request(RiskLevel::Low)).unwrap(), "Air is poor.");
    }

    #[test]
    fn test_request_requires_assessed_record() {
        let record = ZoneRecord::new("Zone A", 100.0, 20.0, 25.0);
        assert!(ExplanationRequest::from_record(&record).is_err());

        let assessed = ZoneRecord {
            stress_score: Some(0.3),
            risk_level: Some(RiskLevel::Low),
            ..record
        };
        let request = ExplanationRequest::from_record(&assessed).unwrap();
        assert_eq!(request.zone, "Zone A");
        assert_eq!(request.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_prompt_mentions_every_field() {
        let prompt = request(RiskLevel::High).prompt();
        assert!(prompt.contains("Zone A"));
        assert!(prompt.contains("Air Quality Index: 187.4"));
        assert!(prompt.contains("Stress Score: 0.72"));
        assert!(prompt.contains("Risk Level: High"));
    }

    #[test]
    fn test_select_without_keys_is_template() {
        let explainer = select_explainer(&ExplainerConfig::default(), &Credentials::default());
        assert_eq!(explainer.provider(), "template");
    }

    #[test]
    fn test_select_prefers_gemini_when_both_keys_present() {
        let credentials = Credentials {
            gemini_api_key: Some("g".to_string()),
            openai_api_key: Some("o".to_string()),
        };
        let explainer = select_explainer(&ExplainerConfig::default(), &credentials);
        assert_eq!(explainer.provider(), "gemini");
    }

    #[test]
    fn test_select_openai_when_only_its_key_present() {
        let credentials = Credentials {
            gemini_api_key: None,
            openai_api_key: Some("o".to_string()),
        };
        let explainer = select_explainer(&ExplainerConfig::default(), &credentials);
        assert_eq!(explainer.provider(), "openai");
    }

    #[test]
    fn test_select_named_provider_without_key_is_template() {
        let config = ExplainerConfig {
            provider: ExplainerProvider::OpenAi,
            ..ExplainerConfig::default()
        };
        let credentials = Credentials {
            gemini_api_key: Some("g".to_string()),
            openai_api_key: None,
        };
        assert_eq!(select_explainer(&config, &credentials).provider(), "template");
    }

    #[test]
    fn test_select_template_ignores_keys() {
        let config = ExplainerConfig {
            provider: ExplainerProvider::Template,
            ..ExplainerConfig::default()
        };
        let credentials = Credentials {
            gemini_api_key: Some("g".to_string()),
            openai_api_key: Some("o".to_string()),
        };
        assert_eq!(select_explainer(&config, &credentials).provider(), "template");
    }
}
