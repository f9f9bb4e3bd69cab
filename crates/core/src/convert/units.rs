use serde::Serialize;

use crate::error::{Result, ToolError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Temperature,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub symbol: &'static str,
    pub aliases: &'static [&'static str],
    pub category: Category,
    /// Multiplier to the category's base unit. Unused for temperature.
    pub factor: f64,
}

const fn unit(
    symbol: &'static str,
    aliases: &'static [&'static str],
    category: Category,
    factor: f64,
) -> Unit {
    Unit {
        symbol,
        aliases,
        category,
        factor,
    }
}

pub const UNITS: &[Unit] = &[
    // Length, base metre
    unit("mm", &["millimeter", "millimetre", "millimeters"], Category::Length, 0.001),
    unit("cm", &["centimeter", "centimetre", "centimeters"], Category::Length, 0.01),
    unit("m", &["meter", "metre", "meters"], Category::Length, 1.0),
    unit("km", &["kilometer", "kilometre", "kilometers"], Category::Length, 1000.0),
    unit("in", &["inch", "inches"], Category::Length, 0.0254),
    unit("ft", &["foot", "feet"], Category::Length, 0.3048),
    unit("yd", &["yard", "yards"], Category::Length, 0.9144),
    unit("mi", &["mile", "miles"], Category::Length, 1609.344),
    // Mass, base kilogram
    unit("mg", &["milligram", "milligrams"], Category::Mass, 0.000_001),
    unit("g", &["gram", "grams"], Category::Mass, 0.001),
    unit("kg", &["kilogram", "kilograms"], Category::Mass, 1.0),
    unit("t", &["tonne", "tonnes"], Category::Mass, 1000.0),
    unit("oz", &["ounce", "ounces"], Category::Mass, 0.028_349_523_125),
    unit("lb", &["pound", "pounds", "lbs"], Category::Mass, 0.453_592_37),
    // Temperature
    unit("c", &["celsius"], Category::Temperature, 1.0),
    unit("f", &["fahrenheit"], Category::Temperature, 1.0),
    unit("k", &["kelvin"], Category::Temperature, 1.0),
    // Data, base byte
    unit("b", &["byte", "bytes"], Category::Data, 1.0),
    unit("kb", &["kilobyte", "kilobytes"], Category::Data, 1e3),
    unit("mb", &["megabyte", "megabytes"], Category::Data, 1e6),
    unit("gb", &["gigabyte", "gigabytes"], Category::Data, 1e9),
    unit("tb", &["terabyte", "terabytes"], Category::Data, 1e12),
    unit("kib", &["kibibyte", "kibibytes"], Category::Data, 1024.0),
    unit("mib", &["mebibyte", "mebibytes"], Category::Data, 1_048_576.0),
    unit("gib", &["gibibyte", "gibibytes"], Category::Data, 1_073_741_824.0),
    unit("tib", &["tebibyte", "tebibytes"], Category::Data, 1_099_511_627_776.0),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitConversion {
    pub category: Category,
    pub value: f64,
    pub from: &'static str,
    pub to: &'static str,
    pub result: f64,
}

pub fn find_unit(name: &str) -> Result<&'static Unit> {
    let needle = name.trim().trim_start_matches('°').to_ascii_lowercase();
    UNITS
        .iter()
        .find(|u| u.symbol == needle || u.aliases.contains(&needle.as_str()))
        .ok_or_else(|| ToolError::invalid(format!("Unknown unit '{}'", name.trim())))
}

pub fn convert_unit(value: f64, from: &str, to: &str) -> Result<UnitConversion> {
    if !value.is_finite() {
        return Err(ToolError::invalid("Value must be a finite number"));
    }
    let from = find_unit(from)?;
    let to = find_unit(to)?;
    if from.category != to.category {
        return Err(ToolError::invalid(format!(
            "Cannot convert {} to {}: different kinds of quantity",
            from.symbol, to.symbol
        )));
    }

    let result = if from.category == Category::Temperature {
        let kelvin = to_kelvin(value, from.symbol);
        if kelvin < 0.0 {
            return Err(ToolError::invalid("Temperature is below absolute zero"));
        }
        from_kelvin(kelvin, to.symbol)
    } else {
        value * from.factor / to.factor
    };

    Ok(UnitConversion {
        category: from.category,
        value,
        from: from.symbol,
        to: to.symbol,
        result,
    })
}

fn to_kelvin(value: f64, symbol: &str) -> f64 {
    match symbol {
        "c" => value + 273.15,
        "f" => (value - 32.0) * 5.0 / 9.0 + 273.15,
        _ => value,
    }
}

fn from_kelvin(kelvin: f64, symbol: &str) -> f64 {
    match symbol {
        "c" => kelvin - 273.15,
        "f" => (kelvin - 273.15) * 9.0 / 5.0 + 32.0,
        _ => kelvin,
    }
}

/// Up to six decimals, trailing zeros trimmed.
pub fn format_quantity(value: f64) -> String {
    let text = format!("{value:.6}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(value: f64, from: &str, to: &str) -> String {
        format_quantity(convert_unit(value, from, to).unwrap().result)
    }

    #[test]
    fn test_length() {
        assert_eq!(convert(1.0, "mi", "km"), "1.609344");
        assert_eq!(convert(12.0, "inches", "ft"), "1");
        assert_eq!(convert(100.0, "cm", "m"), "1");
    }

    #[test]
    fn test_mass() {
        assert_eq!(convert(1.0, "kg", "lb"), "2.204623");
        assert_eq!(convert(16.0, "oz", "lb"), "1");
    }

    #[test]
    fn test_temperature() {
        assert_eq!(convert(100.0, "°C", "F"), "212");
        assert_eq!(convert(32.0, "fahrenheit", "celsius"), "0");
        assert_eq!(convert(0.0, "k", "c"), "-273.15");
    }

    #[test]
    fn test_below_absolute_zero() {
        assert!(convert_unit(-300.0, "c", "k").is_err());
    }

    #[test]
    fn test_data() {
        assert_eq!(convert(1.0, "GiB", "MiB"), "1024");
        assert_eq!(convert(1500.0, "kb", "mb"), "1.5");
    }

    #[test]
    fn test_category_mismatch() {
        let err = convert_unit(1.0, "kg", "m").unwrap_err();
        assert!(err.to_string().contains("different kinds"));
    }

    #[test]
    fn test_unknown_unit() {
        assert!(convert_unit(1.0, "parsec", "m").is_err());
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1.0), "1");
        assert_eq!(format_quantity(0.1 + 0.2), "0.3");
        assert_eq!(format_quantity(-0.0000001), "0");
    }
}
