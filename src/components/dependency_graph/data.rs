//! Compiled-in catalog of entities, relationships, and per-entity lookups.
//!
//! All domain data is a literal table; nothing is ingested at runtime. The
//! tables are validated once at startup so a bad edit here is reported in
//! the console instead of silently dropping edges.

use super::types::{Category, Entity, Relationship};

pub const ENTITIES: &[Entity] = &[
	Entity {
		id: "ai",
		name: "AI-Driven Analytics",
		description: "Predictive modeling, outbreak tracking, and decision support.",
		category: Category::Technology,
	},
	Entity {
		id: "iot",
		name: "IoT-Enabled Monitoring",
		description: "Wearable devices for patient vitals and medical supply tracking.",
		category: Category::Technology,
	},
	Entity {
		id: "blockchain",
		name: "Blockchain for Data Integrity",
		description: "Secure and tamper-proof medical records and data exchange.",
		category: Category::Technology,
	},
	Entity {
		id: "cloud",
		name: "Cloud-Based Collaboration Tools",
		description: "Secure telemedicine, real-time data access, and interoperability.",
		category: Category::Technology,
	},
	Entity {
		id: "cyber",
		name: "Cybersecurity Frameworks",
		description: "Encryption, multi-factor authentication, and perimeterless security.",
		category: Category::Technology,
	},
	Entity {
		id: "data-sharing",
		name: "Real-Time Data Sharing",
		description: "AI-powered dashboards, APIs for system compatibility.",
		category: Category::Process,
	},
	Entity {
		id: "telemedicine",
		name: "Remote Diagnostics & Telemedicine",
		description: "AI-assisted diagnostics, IoT-powered patient monitoring.",
		category: Category::Process,
	},
	Entity {
		id: "resource-allocation",
		name: "Healthcare Resource Allocation",
		description: "AI-driven logistics, blockchain-tracked vaccine distribution.",
		category: Category::Process,
	},
	Entity {
		id: "privacy",
		name: "Data Privacy Compliance",
		description: "End-to-end encryption, risk assessments, and regular audits.",
		category: Category::Process,
	},
	Entity {
		id: "providers",
		name: "Healthcare Providers",
		description: "Doctors and frontline workers leveraging AI insights.",
		category: Category::Human,
	},
	Entity {
		id: "it-specialists",
		name: "IT Specialists",
		description: "Cybersecurity experts ensuring system stability and compliance.",
		category: Category::Human,
	},
	Entity {
		id: "policy-makers",
		name: "Policy Makers",
		description: "Regulating cross-border data exchange and legal standards.",
		category: Category::Human,
	},
];

pub const RELATIONSHIPS: &[Relationship] = &[
	Relationship { source: "ai", target: "data-sharing" },
	Relationship { source: "iot", target: "data-sharing" },
	Relationship { source: "blockchain", target: "data-sharing" },
	Relationship { source: "cloud", target: "telemedicine" },
	Relationship { source: "cyber", target: "privacy" },
	Relationship { source: "data-sharing", target: "providers" },
	Relationship { source: "telemedicine", target: "providers" },
	Relationship { source: "resource-allocation", target: "policy-makers" },
	Relationship { source: "privacy", target: "it-specialists" },
	Relationship { source: "iot", target: "cloud" },
	Relationship { source: "blockchain", target: "resource-allocation" },
	Relationship { source: "cyber", target: "it-specialists" },
	Relationship { source: "providers", target: "policy-makers" },
	Relationship { source: "it-specialists", target: "cloud" },
];

/// Registered mitigations, keyed by entity id. Absence means the overlay
/// omits its risk-strategy section.
pub const RISK_STRATEGIES: &[(&str, &str)] = &[
	("ai", "AI-Driven Threat Detection"),
	("iot", "Redundant Sensors & Multi-Network Protocols (5G, Wi-Fi)"),
	("cloud", "Multi-Cloud Strategies & Automated Data Backups"),
	("blockchain", "Off-Chain Storage Solutions & Smart Contracts"),
];

/// Font Awesome glyph drawn inside each node circle.
const ICONS: &[(&str, &str)] = &[
	("ai", "\u{f5dc}"),
	("iot", "\u{f1eb}"),
	("blockchain", "\u{f0c1}"),
	("cloud", "\u{f0c2}"),
	("cyber", "\u{f3ed}"),
	("data-sharing", "\u{f1c0}"),
	("telemedicine", "\u{f0fa}"),
	("resource-allocation", "\u{f0d1}"),
	("privacy", "\u{f023}"),
	("providers", "\u{f0f0}"),
	("it-specialists", "\u{f109}"),
	("policy-makers", "\u{f24e}"),
];

/// Plain filled circle, used for ids without a registered glyph.
const FALLBACK_ICON: &str = "\u{f111}";

pub fn entity(id: &str) -> Option<&'static Entity> {
	ENTITIES.iter().find(|e| e.id == id)
}

pub fn risk_strategy(id: &str) -> Option<&'static str> {
	RISK_STRATEGIES
		.iter()
		.find(|(key, _)| *key == id)
		.map(|&(_, strategy)| strategy)
}

pub fn icon(id: &str) -> &'static str {
	ICONS
		.iter()
		.find(|(key, _)| *key == id)
		.map(|&(_, glyph)| glyph)
		.unwrap_or(FALLBACK_ICON)
}

/// Check that every relationship endpoint and every keyed lookup refers to
/// a known entity id. Returns the unresolvable references.
pub fn validate() -> Result<(), Vec<String>> {
	let mut unresolved = Vec::new();
	for rel in RELATIONSHIPS {
		if entity(rel.source).is_none() {
			unresolved.push(format!("relationship source `{}`", rel.source));
		}
		if entity(rel.target).is_none() {
			unresolved.push(format!("relationship target `{}`", rel.target));
		}
	}
	for (key, _) in RISK_STRATEGIES {
		if entity(key).is_none() {
			unresolved.push(format!("risk strategy key `{key}`"));
		}
	}
	for (key, _) in ICONS {
		if entity(key).is_none() {
			unresolved.push(format!("icon key `{key}`"));
		}
	}
	if unresolved.is_empty() {
		Ok(())
	} else {
		Err(unresolved)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn catalog_references_resolve() {
		assert_eq!(validate(), Ok(()));
	}

	#[test]
	fn entity_ids_are_unique() {
		for (i, a) in ENTITIES.iter().enumerate() {
			for b in &ENTITIES[i + 1..] {
				assert_ne!(a.id, b.id);
			}
		}
	}

	#[test]
	fn operational_flag_scope_is_technology_only() {
		let tech: Vec<_> = ENTITIES
			.iter()
			.filter(|e| e.category == Category::Technology)
			.map(|e| e.id)
			.collect();
		assert_eq!(tech, ["ai", "iot", "blockchain", "cloud", "cyber"]);
	}

	#[test]
	fn risk_strategy_lookup() {
		assert_eq!(risk_strategy("ai"), Some("AI-Driven Threat Detection"));
		assert_eq!(risk_strategy("data-sharing"), None);
	}

	#[test]
	fn icon_falls_back_for_unknown_id() {
		assert_eq!(icon("ai"), "\u{f5dc}");
		assert_eq!(icon("nonexistent"), FALLBACK_ICON);
	}
}
