//! Travel desk tools: weather and currency exchange.
//!
//! Neither tool talks to a real data source. Both synthesize plausible values
//! from a random generator so the agent loop can be exercised offline. Swap the
//! report functions for a real feed client to go live.

use super::{ParamType, ToolArguments, ToolFunction};
use rand::Rng;
use tracing::info;

pub const WEATHER_TOOL: &str = "get_weather";
pub const EXCHANGE_RATE_TOOL: &str = "get_exchange_rate";

const CONDITIONS: [&str; 4] = ["sunny", "cloudy", "rainy", "stormy"];

/// Simulated weather report for `location`.
pub fn weather_report<R: Rng + ?Sized>(rng: &mut R, location: &str) -> String {
    let condition = CONDITIONS[rng.gen_range(0..CONDITIONS.len())];
    let temperature = rng.gen_range(10..=30);
    format!(
        "The weather in {} is {}, {}°C.",
        location, condition, temperature
    )
}

/// Simulated exchange rate from `base` to `target`.
///
/// KRW targets land in 1300.00..=1450.00, everything else in 0.80..=1.50.
pub fn exchange_rate<R: Rng + ?Sized>(rng: &mut R, target: &str) -> f64 {
    let hundredths = if target == "KRW" {
        rng.gen_range(130_000..=145_000)
    } else {
        rng.gen_range(80..=150)
    };
    hundredths as f64 / 100.0
}

/// Format an exchange rate report.
pub fn exchange_rate_report<R: Rng + ?Sized>(rng: &mut R, base: &str, target: &str) -> String {
    let base = base.trim().to_uppercase();
    let target = target.trim().to_uppercase();
    let rate = exchange_rate(rng, &target);
    format!(
        "The current exchange rate from {} to {} is {:.2}.",
        base, target, rate
    )
}

/// `get_weather(location)` tool.
pub fn weather_tool() -> ToolFunction {
    ToolFunction::new(
        WEATHER_TOOL,
        "Get the current weather for a city or region.",
        |args: ToolArguments| {
            let report = args.str("location").map(|location| {
                info!("Weather lookup: {}", location);
                weather_report(&mut rand::thread_rng(), location)
            });
            async move { report }
        },
    )
    .param(
        "location",
        ParamType::String,
        "City or region to check the weather for",
        true,
    )
}

/// `get_exchange_rate(base_currency, target_currency)` tool.
pub fn exchange_rate_tool() -> ToolFunction {
    ToolFunction::new(
        EXCHANGE_RATE_TOOL,
        "Get the current exchange rate between two currencies.",
        |args: ToolArguments| {
            let report = args.str("base_currency").and_then(|base| {
                let target = args.str("target_currency")?;
                info!("Exchange rate lookup: {} -> {}", base, target);
                Ok(exchange_rate_report(&mut rand::thread_rng(), base, target))
            });
            async move { report }
        },
    )
    .param(
        "base_currency",
        ParamType::String,
        "Base currency code (e.g. USD, EUR)",
        true,
    )
    .param(
        "target_currency",
        ParamType::String,
        "Target currency code (e.g. KRW, JPY)",
        true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::ToolRegistry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn rate_in_report(report: &str) -> f64 {
        report
            .trim_end_matches('.')
            .rsplit(' ')
            .next()
            .and_then(|s| s.parse().ok())
            .expect("report ends with a rate")
    }

    #[test]
    fn test_krw_rate_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let rate = exchange_rate(&mut rng, "KRW");
            assert!((1300.0..=1450.0).contains(&rate), "rate {}", rate);
        }
    }

    #[test]
    fn test_other_rate_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let rate = exchange_rate(&mut rng, "JPY");
            assert!((0.8..=1.5).contains(&rate), "rate {}", rate);
        }
    }

    #[test]
    fn test_weather_report_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let report = weather_report(&mut rng, "Seattle");
        assert!(report.starts_with("The weather in Seattle is "));
        assert!(CONDITIONS.iter().any(|c| report.contains(c)));
        assert!(report.ends_with("°C."));
    }

    #[tokio::test]
    async fn test_exchange_rate_tool_usd_to_krw() {
        let registry = ToolRegistry::new().with(exchange_rate_tool()).unwrap();
        let out = registry
            .invoke(
                EXCHANGE_RATE_TOOL,
                &json!({"base_currency": "USD", "target_currency": "KRW"}),
            )
            .await
            .unwrap();

        assert!(out.contains("USD"));
        assert!(out.contains("KRW"));
        let rate = rate_in_report(&out);
        assert!((1000.0..=1500.0).contains(&rate), "rate {}", rate);
    }

    #[tokio::test]
    async fn test_exchange_rate_tool_normalizes_codes() {
        let registry = ToolRegistry::new().with(exchange_rate_tool()).unwrap();
        let out = registry
            .invoke(
                EXCHANGE_RATE_TOOL,
                &json!({"base_currency": "usd", "target_currency": " krw "}),
            )
            .await
            .unwrap();
        assert!(out.contains("from USD to KRW"));
        assert!(rate_in_report(&out) > 1000.0);
    }

    #[tokio::test]
    async fn test_weather_tool_requires_location() {
        let registry = ToolRegistry::new().with(weather_tool()).unwrap();
        assert!(registry.invoke(WEATHER_TOOL, &json!({})).await.is_err());
        let out = registry
            .invoke(WEATHER_TOOL, &json!({"location": "Tokyo"}))
            .await
            .unwrap();
        assert!(out.contains("Tokyo"));
    }
}
