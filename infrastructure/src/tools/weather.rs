//! Weather tool: simulated current conditions for a location

use hostagent_domain::{ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult};
use rand::Rng;

use super::LocalTool;

pub const WEATHER: &str = "weather";

const CELSIUS: &str = "celsius";
const FAHRENHEIT: &str = "fahrenheit";

const CONDITIONS: [&str; 5] = ["晴天", "多云", "小雨", "阴天", "雾霾"];

/// One simulated observation, temperature in whole degrees Celsius
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub celsius: i32,
    pub condition: &'static str,
    pub humidity: u32,
    pub wind_kmh: u32,
}

impl Reading {
    /// 5-34 °C, 40-79 % humidity, 5-24 km/h wind
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self {
            celsius: rng.random_range(5..35),
            condition: CONDITIONS[rng.random_range(0..CONDITIONS.len())],
            humidity: rng.random_range(40..80),
            wind_kmh: rng.random_range(5..25),
        }
    }
}

pub struct WeatherTool;

impl WeatherTool {
    /// Report text for `reading`; Fahrenheit values are truncated to whole degrees
    pub fn report(location: &str, fahrenheit: bool, reading: &Reading) -> String {
        let (temperature, symbol) = if fahrenheit {
            ((reading.celsius as f64 * 9.0 / 5.0 + 32.0) as i32, "F")
        } else {
            (reading.celsius, "C")
        };

        format!(
            "📍 {} 的天气信息：\n🌡️ 温度：{}°{}\n☁️ 天气：{}\n💨 湿度：{}%\n🌬️ 风速：{} km/h",
            location, temperature, symbol, reading.condition, reading.humidity, reading.wind_kmh
        )
    }
}

impl LocalTool for WeatherTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(WEATHER, "Get weather information for a location")
            .with_parameter(ToolParameter::new("location", "City or region name", true))
            .with_parameter(
                ToolParameter::new("unit", "Temperature unit", false)
                    .with_allowed_values([CELSIUS, FAHRENHEIT])
                    .with_default(CELSIUS),
            )
    }

    fn execute(&self, call: &ToolCall) -> ToolResult {
        let location = match call.require_string("location") {
            Ok(location) => location,
            Err(e) => return ToolResult::failure(WEATHER, ToolError::invalid_argument(e)),
        };
        let fahrenheit = match call.get_string("unit").unwrap_or(CELSIUS) {
            CELSIUS => false,
            FAHRENHEIT => true,
            other => {
                return ToolResult::failure(
                    WEATHER,
                    ToolError::invalid_argument(format!(
                        "Invalid unit '{}': expected celsius or fahrenheit",
                        other
                    )),
                );
            }
        };

        ToolResult::success(WEATHER, Self::report(location, fahrenheit, &Reading::random()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reading() -> Reading {
        Reading {
            celsius: 20,
            condition: "多云",
            humidity: 55,
            wind_kmh: 12,
        }
    }

    #[test]
    fn test_definition_schema() {
        let schema = WeatherTool.definition().input_schema();

        assert_eq!(schema["required"], json!(["location"]));
        assert_eq!(schema["properties"]["unit"]["enum"], json!(["celsius", "fahrenheit"]));
        assert_eq!(schema["properties"]["unit"]["default"], "celsius");
    }

    #[test]
    fn test_report_units() {
        assert_eq!(
            WeatherTool::report("北京", false, &reading()),
            "📍 北京 的天气信息：\n🌡️ 温度：20°C\n☁️ 天气：多云\n💨 湿度：55%\n🌬️ 风速：12 km/h"
        );

        let text = WeatherTool::report("Paris", true, &reading());
        assert!(text.contains("温度：68°F"));

        // 7 °C is 44.6 °F, truncated
        let cold = Reading { celsius: 7, ..reading() };
        assert!(WeatherTool::report("Oslo", true, &cold).contains("温度：44°F"));
    }

    #[test]
    fn test_random_reading_ranges() {
        for _ in 0..200 {
            let r = Reading::random();
            assert!((5..35).contains(&r.celsius));
            assert!(CONDITIONS.contains(&r.condition));
            assert!((40..80).contains(&r.humidity));
            assert!((5..25).contains(&r.wind_kmh));
        }
    }

    #[test]
    fn test_execute() {
        let result = WeatherTool.execute(&ToolCall::new(WEATHER).with_arg("location", "上海"));
        assert!(result.is_success());
        assert!(result.text().starts_with("📍 上海 的天气信息"));
        assert!(result.text().contains("°C"));

        let result = WeatherTool.execute(
            &ToolCall::new(WEATHER)
                .with_arg("location", "上海")
                .with_arg("unit", "fahrenheit"),
        );
        assert!(result.text().contains("°F"));
    }

    #[test]
    fn test_execute_invalid_arguments() {
        let result = WeatherTool.execute(&ToolCall::new(WEATHER));
        assert_eq!(result.error.unwrap().code, "INVALID_ARGUMENT");

        let result = WeatherTool.execute(
            &ToolCall::new(WEATHER)
                .with_arg("location", "上海")
                .with_arg("unit", "kelvin"),
        );
        assert_eq!(result.error.unwrap().code, "INVALID_ARGUMENT");
    }
}
