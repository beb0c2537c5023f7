//! Facet-key -> icon rules. The row component looks its icon up here,
//! so adding a facet means adding a registry entry, not editing the row.

use alert_core::types::{AlertStatus, Severity};

pub const FALLBACK_ICON: &str = "/icons/alertdeck-icon.png";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FacetGlyph {
    Image { src: String },
    Glyph { symbol: &'static str, color: &'static str },
}

type IconRule = fn(&str) -> FacetGlyph;

fn registry() -> &'static [(&'static str, IconRule)] {
    &[
        ("source", source_icon),
        ("severity", severity_glyph),
        ("status", status_glyph),
        ("assignee", assignee_glyph),
        ("dismissed", dismissed_glyph),
        ("incident", incident_glyph),
    ]
}

pub fn icon_for(facet_key: &str, value: &str) -> Option<FacetGlyph> {
    registry()
        .iter()
        .find(|(key, _)| *key == facet_key)
        .map(|(_, rule)| rule(value))
}

fn source_icon(value: &str) -> FacetGlyph {
    // Address-shaped source values come from mail integrations.
    let src = if value.contains('@') {
        "/icons/mailgun-icon.png".to_string()
    } else {
        format!("/icons/{value}-icon.png")
    };
    FacetGlyph::Image { src }
}

fn severity_glyph(value: &str) -> FacetGlyph {
    let color = match Severity::parse(value) {
        Some(Severity::Critical) => "#dc2626",
        Some(Severity::High) => "#ea580c",
        Some(Severity::Warning) => "#d97706",
        Some(Severity::Info) => "#2563eb",
        Some(Severity::Low) => "#16a34a",
        None => "#6b7280",
    };
    FacetGlyph::Glyph { symbol: "▲", color }
}

pub fn status_color(value: &str) -> &'static str {
    match AlertStatus::parse(value) {
        Some(AlertStatus::Firing) => "#ef4444",
        Some(AlertStatus::Resolved) => "#22c55e",
        Some(AlertStatus::Acknowledged) => "#3b82f6",
        Some(AlertStatus::Suppressed) => "#f59e0b",
        Some(AlertStatus::Pending) | None => "#6b7280",
    }
}

fn status_glyph(value: &str) -> FacetGlyph {
    let symbol = match AlertStatus::parse(value) {
        Some(AlertStatus::Resolved) => "✓",
        Some(AlertStatus::Suppressed) => "–",
        Some(AlertStatus::Pending) => "○",
        _ => "●",
    };
    FacetGlyph::Glyph {
        symbol,
        color: status_color(value),
    }
}

fn assignee_glyph(_value: &str) -> FacetGlyph {
    FacetGlyph::Glyph {
        symbol: "👤",
        color: "#4b5563",
    }
}

fn dismissed_glyph(value: &str) -> FacetGlyph {
    let symbol = if value == "true" { "🔕" } else { "🔔" };
    FacetGlyph::Glyph {
        symbol,
        color: "#4b5563",
    }
}

fn incident_glyph(_value: &str) -> FacetGlyph {
    FacetGlyph::Glyph {
        symbol: "🔥",
        color: "#4b5563",
    }
}
