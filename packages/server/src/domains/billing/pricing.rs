//! Per-model price table and cost calculation.
//!
//! Pure and deterministic: no clock, no I/O, no state.

use rust_decimal::Decimal;

use crate::kernel::traits::TokenUsage;
use crate::kernel::{GPT_5_MINI, GPT_5_NANO};

/// Requests are rejected when the balance drops below this threshold.
pub const MIN_TOKEN_BALANCE: Decimal = Decimal::from_parts(9, 0, 0, false, 2);

/// Price per token (input, output) for a model.
///
/// Unknown models price at zero: a missing price entry must never block
/// content delivery.
fn price_per_token(model: &str) -> Option<(Decimal, Decimal)> {
    match model {
        // $0.05 / $0.40 per 1M tokens
        GPT_5_NANO => Some((
            Decimal::from_parts(5, 0, 0, false, 8),
            Decimal::from_parts(4, 0, 0, false, 7),
        )),
        // $0.25 / $2.00 per 1M tokens
        GPT_5_MINI => Some((
            Decimal::from_parts(25, 0, 0, false, 8),
            Decimal::from_parts(2, 0, 0, false, 6),
        )),
        _ => None,
    }
}

/// Cost of a completion call in account tokens.
///
/// `prompt_tokens * input_price + completion_tokens * output_price`;
/// zero for unknown models.
pub fn calculate_cost(model: &str, usage: &TokenUsage) -> Decimal {
    let Some((input_price, output_price)) = price_per_token(model) else {
        return Decimal::ZERO;
    };

    Decimal::from(usage.prompt_tokens) * input_price
        + Decimal::from(usage.completion_tokens) * output_price
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(prompt: u32, completion: u32) -> TokenUsage {
        TokenUsage {
            prompt_tokens: prompt,
            completion_tokens: completion,
        }
    }

    #[test]
    fn known_model_costs_are_positive() {
        let cost = calculate_cost(GPT_5_NANO, &usage(1000, 500));
        assert!(cost > Decimal::ZERO);
    }

    #[test]
    fn unknown_model_costs_zero() {
        assert_eq!(calculate_cost("some-future-model", &usage(1000, 500)), Decimal::ZERO);
        assert_eq!(calculate_cost("", &usage(0, 0)), Decimal::ZERO);
    }

    #[test]
    fn cost_is_monotonic_in_completion_tokens() {
        let mut previous = Decimal::ZERO;
        for completion_tokens in [0u32, 10, 100, 1000, 100_000] {
            let cost = calculate_cost(GPT_5_NANO, &usage(500, completion_tokens));
            assert!(cost >= previous);
            previous = cost;
        }
    }

    #[test]
    fn cost_is_monotonic_in_prompt_tokens() {
        let mut previous = Decimal::ZERO;
        for prompt_tokens in [0u32, 10, 100, 1000, 100_000] {
            let cost = calculate_cost(GPT_5_NANO, &usage(prompt_tokens, 500));
            assert!(cost >= previous);
            previous = cost;
        }
    }

    #[test]
    fn cost_matches_hand_computed_value() {
        // 1M prompt tokens at $0.05/1M + 1M completion tokens at $0.40/1M
        let cost = calculate_cost(GPT_5_NANO, &usage(1_000_000, 1_000_000));
        assert_eq!(cost, Decimal::from_parts(45, 0, 0, false, 2));
    }

    #[test]
    fn zero_usage_costs_zero() {
        assert_eq!(calculate_cost(GPT_5_NANO, &usage(0, 0)), Decimal::ZERO);
    }

    #[test]
    fn min_balance_is_nine_cents_of_tokens() {
        assert_eq!(MIN_TOKEN_BALANCE.to_string(), "0.09");
    }
}
