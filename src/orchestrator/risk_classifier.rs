use serde::Serialize;

/// Severity of the crisis signal detected in one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RiskLevel {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    pub fn as_i32(self) -> i32 {
        match self {
            RiskLevel::None => 0,
            RiskLevel::Low => 1,
            RiskLevel::Moderate => 2,
            RiskLevel::High => 3,
            RiskLevel::Critical => 4,
        }
    }

    /// High and critical tiers switch the reply into crisis mode.
    pub fn is_crisis(self) -> bool {
        self >= RiskLevel::High
    }

    /// Moderate and above are persisted as risk events.
    pub fn is_recordable(self) -> bool {
        self >= RiskLevel::Moderate
    }
}

#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub matched: Vec<String>,
}

/// Ordered keyword sets, scanned critical-first. Injected at construction so
/// deployments can swap language or wording without code changes.
#[derive(Debug, Clone)]
pub struct RiskKeywords {
    pub critical: Vec<String>,
    pub high: Vec<String>,
    pub moderate: Vec<String>,
}

impl Default for RiskKeywords {
    fn default() -> Self {
        let to_owned = |terms: &[&str]| terms.iter().map(|t| t.to_string()).collect();

        Self {
            critical: to_owned(&[
                "suicídio",
                "suicidar",
                "me matar",
                "acabar com tudo",
                "não aguento mais",
                "não vale a pena viver",
                "quero morrer",
                "vou me matar",
                "quero sumir",
                "acabar com minha vida",
                "prefiro morrer",
                "melhor morto",
            ]),
            high: to_owned(&[
                "desesperado",
                "sem saída",
                "sem esperança",
                "desistir",
                "não consigo mais",
                "acabou",
                "me machucar",
                "autoagressão",
                "me cortar",
                "me ferir",
            ]),
            moderate: to_owned(&[
                "muito triste",
                "muito ansioso",
                "muito mal",
                "péssimo",
                "horrível",
                "pânico",
                "desespero",
                "sozinho",
                "ninguém liga",
                "abandono",
            ]),
        }
    }
}

/// Pure, total classifier: substring matching against the keyword tiers.
/// Matching is not tokenized, so a term inside an unrelated word still
/// triggers — over-triggering is the safer failure mode for this detector.
/// The keyword lists are single-language; other languages degrade to tier 0.
pub struct RiskClassifier {
    keywords: RiskKeywords,
}

impl RiskClassifier {
    pub fn new(keywords: RiskKeywords) -> Self {
        Self { keywords }
    }

    pub fn classify(&self, message: &str) -> RiskAssessment {
        let lower = message.to_lowercase();

        // Critical terms short-circuit with exactly one matched term
        for term in &self.keywords.critical {
            if lower.contains(term.as_str()) {
                return RiskAssessment {
                    level: RiskLevel::Critical,
                    matched: vec![term.clone()],
                };
            }
        }

        let matched: Vec<String> = self
            .keywords
            .high
            .iter()
            .filter(|term| lower.contains(term.as_str()))
            .cloned()
            .collect();
        if !matched.is_empty() {
            return RiskAssessment {
                level: RiskLevel::High,
                matched,
            };
        }

        let matched: Vec<String> = self
            .keywords
            .moderate
            .iter()
            .filter(|term| lower.contains(term.as_str()))
            .cloned()
            .collect();

        let level = match matched.len() {
            0 => RiskLevel::None,
            1 => RiskLevel::Low,
            _ => RiskLevel::Moderate,
        };

        RiskAssessment { level, matched }
    }
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(RiskKeywords::default())
    }
}
