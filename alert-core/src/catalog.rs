use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "type")]
    pub provider_type: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_example: Option<serde_json::Value>,
}

/// The set of integrations the gateway accepts events from.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProviderCatalog {
    pub providers: Vec<Provider>,
}

/// A provider that can seed the push form: its example payload,
/// pretty-printed for editing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSource {
    pub name: String,
    pub source_type: String,
    pub alert_example: String,
}

impl ProviderCatalog {
    pub fn builtin() -> Self {
        Self {
            providers: vec![
                Provider {
                    provider_type: "datadog".into(),
                    display_name: "Datadog".into(),
                    alert_example: Some(serde_json::json!({
                        "title": "High CPU on i-0a1b2c3d",
                        "severity": "high",
                        "status": "firing",
                        "host": "i-0a1b2c3d",
                        "monitor_id": 812,
                        "tags": ["env:prod", "service:checkout"]
                    })),
                },
                Provider {
                    provider_type: "prometheus".into(),
                    display_name: "Prometheus".into(),
                    alert_example: Some(serde_json::json!({
                        "summary": "InstanceDown: node-exporter on db-1",
                        "severity": "critical",
                        "status": "firing",
                        "labels": {
                            "alertname": "InstanceDown",
                            "instance": "db-1:9100"
                        }
                    })),
                },
                Provider {
                    provider_type: "grafana".into(),
                    display_name: "Grafana".into(),
                    alert_example: Some(serde_json::json!({
                        "title": "p99 latency above threshold",
                        "severity": "warning",
                        "status": "firing",
                        "dashboard": "api-overview",
                        "panel": "p99 latency"
                    })),
                },
                Provider {
                    provider_type: "sentry".into(),
                    display_name: "Sentry".into(),
                    alert_example: Some(serde_json::json!({
                        "title": "TypeError in checkout/cart.ts",
                        "severity": "high",
                        "status": "firing",
                        "project": "storefront",
                        "culprit": "checkout/cart.ts in addItem"
                    })),
                },
                Provider {
                    provider_type: "cloudwatch".into(),
                    display_name: "CloudWatch".into(),
                    alert_example: Some(serde_json::json!({
                        "title": "orders-queue-depth in ALARM",
                        "severity": "warning",
                        "status": "firing",
                        "alarm_arn": "arn:aws:cloudwatch:us-east-1:123456789012:alarm:orders-queue-depth"
                    })),
                },
                // Log-only integration, declares no example payload.
                Provider {
                    provider_type: "console".into(),
                    display_name: "Console".into(),
                    alert_example: None,
                },
            ],
        }
    }

    pub fn get(&self, provider_type: &str) -> Option<&Provider> {
        self.providers
            .iter()
            .find(|p| p.provider_type == provider_type)
    }

    pub fn contains(&self, provider_type: &str) -> bool {
        self.get(provider_type).is_some()
    }

    /// Providers that can seed the push form. Providers without an
    /// example payload are excluded.
    pub fn alert_sources(&self) -> Vec<AlertSource> {
        self.providers
            .iter()
            .filter_map(|provider| {
                let example = provider.alert_example.as_ref()?;
                Some(AlertSource {
                    name: provider.display_name.clone(),
                    source_type: provider.provider_type.clone(),
                    alert_example: serde_json::to_string_pretty(example)
                        .unwrap_or_default(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_exclude_providers_without_examples() {
        let catalog = ProviderCatalog::builtin();
        let sources = catalog.alert_sources();

        let with_example = catalog
            .providers
            .iter()
            .filter(|p| p.alert_example.is_some())
            .count();
        assert_eq!(sources.len(), with_example);
        assert!(sources.iter().all(|s| s.source_type != "console"));
    }

    #[test]
    fn each_example_provider_appears_exactly_once() {
        let sources = ProviderCatalog::builtin().alert_sources();
        let datadog: Vec<_> = sources
            .iter()
            .filter(|s| s.source_type == "datadog")
            .collect();
        assert_eq!(datadog.len(), 1);
        assert_eq!(datadog[0].name, "Datadog");
    }

    #[test]
    fn example_payloads_are_pretty_printed() {
        let sources = ProviderCatalog::builtin().alert_sources();
        let datadog = sources.iter().find(|s| s.source_type == "datadog").unwrap();

        // Multi-line with indentation, and still valid JSON.
        assert!(datadog.alert_example.contains("\n  "));
        let parsed: serde_json::Value =
            serde_json::from_str(&datadog.alert_example).unwrap();
        assert_eq!(parsed["severity"], "high");
    }

    #[test]
    fn lookup_by_provider_type() {
        let catalog = ProviderCatalog::builtin();
        assert!(catalog.contains("prometheus"));
        assert!(!catalog.contains("pagerduty"));
    }
}
