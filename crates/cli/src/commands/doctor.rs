use secrecy::ExposeSecret;
use serde::Serialize;
use shopscout_core::catalog::Catalog;
use shopscout_core::config::{AppConfig, LlmProvider, LoadOptions};

use super::CommandResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(json_output: bool) -> CommandResult {
    let report = build_report();
    let exit_code = if report.overall_status == CheckStatus::Pass { 0 } else { 6 };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    CommandResult { exit_code, output }
}

fn build_report() -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(LoadOptions::default()) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_catalog(&config));
            checks.push(check_llm_readiness(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "catalog_readability",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
            checks.push(DoctorCheck {
                name: "llm_readiness",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let all_pass = checks.iter().all(|check| check.status == CheckStatus::Pass);
    let overall_status = if all_pass { CheckStatus::Pass } else { CheckStatus::Fail };
    let summary = if all_pass {
        "doctor: all readiness checks passed".to_string()
    } else {
        "doctor: one or more readiness checks failed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_catalog(config: &AppConfig) -> DoctorCheck {
    match Catalog::from_json_path(&config.catalog.path) {
        Ok(catalog) if catalog.is_empty() => DoctorCheck {
            name: "catalog_readability",
            status: CheckStatus::Fail,
            details: format!("catalog at `{}` contains no products", config.catalog.path.display()),
        },
        Ok(catalog) => DoctorCheck {
            name: "catalog_readability",
            status: CheckStatus::Pass,
            details: format!(
                "catalog at `{}` loaded with {} products",
                config.catalog.path.display(),
                catalog.len()
            ),
        },
        Err(error) => DoctorCheck {
            name: "catalog_readability",
            status: CheckStatus::Fail,
            details: format!("{error} (run `shopscout seed` to create a demo catalog)"),
        },
    }
}

fn check_llm_readiness(config: &AppConfig) -> DoctorCheck {
    let details = match config.llm.provider {
        LlmProvider::OpenAi => {
            let has_key = config
                .llm
                .api_key
                .as_ref()
                .map(|key| !key.expose_secret().trim().is_empty())
                .unwrap_or(false);
            if !has_key {
                return DoctorCheck {
                    name: "llm_readiness",
                    status: CheckStatus::Fail,
                    details: "openai provider selected but llm.api_key is not set".to_string(),
                };
            }
            format!("openai provider configured with model `{}`", config.llm.model)
        }
        LlmProvider::Ollama => {
            let base_url = config.llm.base_url.as_deref().unwrap_or_default();
            if base_url.trim().is_empty() {
                return DoctorCheck {
                    name: "llm_readiness",
                    status: CheckStatus::Fail,
                    details: "ollama provider selected but llm.base_url is not set".to_string(),
                };
            }
            format!("ollama provider configured at `{base_url}` with model `{}`", config.llm.model)
        }
    };

    DoctorCheck { name: "llm_readiness", status: CheckStatus::Pass, details }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = vec![report.summary.clone()];
    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "FAIL",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("  [{marker}] {}: {}", check.name, check.details));
    }
    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
