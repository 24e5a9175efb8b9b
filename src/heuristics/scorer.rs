use crate::domain::Category;

pub const PRODUCTIVE_HINTS: &[&str] = &[
    "status",
    "atualiza",
    "andamento",
    "suporte",
    "erro",
    "problema",
    "ticket",
    "urgente",
];

pub const UNPRODUCTIVE_HINTS: &[&str] = &[
    "feliz natal",
    "bom dia",
    "boa tarde",
    "parabéns",
    "obrigado",
];

const BASE_CONFIDENCE: f64 = 0.55;
const CONFIDENCE_STEP: f64 = 0.1;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Number of distinct hints of each kind found in a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HintScore {
    pub productive: usize,
    pub unproductive: usize,
}

impl HintScore {
    pub fn category(&self) -> Category {
        if self.productive >= self.unproductive.max(1) {
            Category::Productive
        } else {
            Category::Unproductive
        }
    }

    /// Only the upper bound is clamped; many unproductive hints push this
    /// below 0.55 and eventually below zero.
    pub fn confidence(&self) -> f64 {
        let offset = self.productive as f64 - self.unproductive as f64;
        (BASE_CONFIDENCE + CONFIDENCE_STEP * offset).min(MAX_CONFIDENCE)
    }
}

pub fn score(text: &str) -> HintScore {
    let normalized = text.to_lowercase();
    HintScore {
        productive: count_hints(&normalized, PRODUCTIVE_HINTS),
        unproductive: count_hints(&normalized, UNPRODUCTIVE_HINTS),
    }
}

fn count_hints(text: &str, hints: &[&str]) -> usize {
    hints.iter().filter(|hint| text.contains(*hint)).count()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn repeated_hint_counts_once() {
        let result = score("erro erro erro, ERRO de novo");
        assert_eq!(
            result,
            HintScore {
                productive: 1,
                unproductive: 0
            }
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_substring_based() {
        let result = score("Favor ATUALIZAR o Status. Feliz Natal e PARABÉNS!");
        assert_eq!(result.productive, 2);
        assert_eq!(result.unproductive, 2);
        assert_eq!(result.category(), Category::Productive);
    }

    #[test]
    fn status_ticket_urgente_scores_three_productive_hints() {
        let result = score("status do meu ticket, por favor, é urgente");
        assert_eq!(result.productive, 3);
        assert_eq!(result.unproductive, 0);
        assert_eq!(result.category(), Category::Productive);
        assert!((result.confidence() - 0.85).abs() < 1e-9);
    }

    #[test]
    fn confidence_clamps_at_upper_bound() {
        let result = score("status, andamento, suporte, erro, problema, ticket, urgente");
        assert_eq!(result.productive, 7);
        assert_eq!(result.confidence(), MAX_CONFIDENCE);
    }

    #[test]
    fn empty_text_is_unproductive() {
        let result = score("");
        assert_eq!(result, HintScore::default());
        assert_eq!(result.category(), Category::Unproductive);
        assert!((result.confidence() - 0.55).abs() < 1e-9);
    }

    #[test]
    fn unproductive_only_text_lowers_confidence() {
        let result = score("bom dia, obrigado");
        assert_eq!(result.unproductive, 2);
        assert_eq!(result.category(), Category::Unproductive);
        assert!((result.confidence() - 0.35).abs() < 1e-9);
    }

    #[test]
    fn confidence_has_no_lower_clamp() {
        let result = HintScore {
            productive: 0,
            unproductive: 7,
        };
        assert!(result.confidence() < 0.0);
    }

    #[test]
    fn tie_with_at_least_one_productive_hint_is_productive() {
        let result = score("bom dia, preciso de suporte");
        assert_eq!(result.productive, 1);
        assert_eq!(result.unproductive, 1);
        assert_eq!(result.category(), Category::Productive);
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "Olá, qual o andamento do ticket? Obrigado";
        assert_eq!(score(text), score(text));
    }
}
