//! Unit conversion functions for the plugin registry

use imperial_plugin::prelude::*;
use imperial_core::{parse_magnitude, parse_positive_magnitude};
use tracing::debug;
use crate::convert::{list_units, Converter};
use crate::format::{format_result_in, NumberLocale};
use crate::guide::guide_lines;
use crate::UnitError;

fn unit_error_to_imperial(e: UnitError) -> ImperialError {
    match e {
        UnitError::UnknownUnit { name, suggestions } => {
            ImperialError::unknown_unit(&name, &suggestions)
        }
    }
}

/// A number, or text holding one
fn number_arg(func: &str, arg: &str, value: &Value) -> Result<f64, ImperialError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(s) => Ok(parse_magnitude(s)?),
        other => Err(ImperialError::arg_type(func, arg, "Number", other.type_name())),
    }
}

fn text_arg<'a>(func: &str, arg: &str, value: &'a Value) -> Result<&'a str, ImperialError> {
    value
        .as_text()
        .ok_or_else(|| ImperialError::arg_type(func, arg, "Text", value.type_name()))
}

/// Locale from the context; an unrecognised tag falls back to en-US
fn context_locale(ctx: &EvalContext) -> NumberLocale {
    NumberLocale::from_tag(&ctx.locale).unwrap_or_else(|| {
        debug!(locale = %ctx.locale, "unrecognised locale, using en-US");
        NumberLocale::default()
    })
}

fn check_arg_count(meta: &FunctionMeta, args: &[Value]) -> Result<(), ImperialError> {
    let required = meta.required_args();
    if args.len() < required {
        return Err(ImperialError::arg_count(meta.name, required, args.len()));
    }
    Ok(())
}

fn into_value(result: Result<Value, ImperialError>) -> Value {
    result.unwrap_or_else(Value::Error)
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"foot\")"),
    ArgMeta::required("to_unit", "Text", "Target unit (e.g., \"inch\")"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(1, \"foot\", \"inch\") → 12",
    "convert(1, \"mile\", \"furlong\") → 8",
    "convert(1, \"yard\", \"foot\") → 3",
];

static CONVERT_RELATED: [&str; 3] = ["to_meters", "format_result", "list_units"];

impl Convert {
    fn run(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, ImperialError> {
        check_arg_count(&self.meta(), args)?;
        let value = number_arg("convert", "value", &args[0])?;
        let from = text_arg("convert", "from_unit", &args[1])?;
        let to = text_arg("convert", "to_unit", &args[2])?;

        let result = Converter::new(ctx.unknown_units)
            .convert(value, from, to)
            .map_err(unit_error_to_imperial)?;
        Ok(Value::Number(result))
    }
}

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a length from one unit to another via meters",
            usage: "convert(value, from_unit, to_unit)",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(self.run(args, ctx))
    }
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_EXAMPLES: [&str; 1] = ["list_units() → [\"twip\", \"point\", ..., \"league\"]"];

static LIST_UNITS_RELATED: [&str; 2] = ["convert", "conversion_guide"];

impl FunctionPlugin for ListUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_units",
            description: "List the supported length units in display order",
            usage: "list_units()",
            args: &[],
            returns: "List",
            examples: &LIST_UNITS_EXAMPLES,
            category: "units",
            related: &LIST_UNITS_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        Value::List(list_units().into_iter().map(Value::from).collect())
    }
}

// ============ format_result ============

pub struct FormatResult;

static FORMAT_RESULT_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Converted value"),
    ArgMeta::required("unit", "Text", "Unit name appended after the number"),
    ArgMeta::optional("locale", "Text", "Locale for separators", "server locale"),
];

static FORMAT_RESULT_EXAMPLES: [&str; 2] = [
    "format_result(4050.2, \"foot\") → \"4,050.20 foot\"",
    "format_result(4050.2, \"foot\", \"de-DE\") → \"4.050,20 foot\"",
];

static FORMAT_RESULT_RELATED: [&str; 2] = ["convert", "convert_input"];

impl FormatResult {
    fn run(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, ImperialError> {
        check_arg_count(&self.meta(), args)?;
        let value = number_arg("format_result", "value", &args[0])?;
        let unit = text_arg("format_result", "unit", &args[1])?;

        let locale = match args.get(2) {
            None | Some(Value::Null) => context_locale(ctx),
            Some(arg) => {
                let tag = text_arg("format_result", "locale", arg)?;
                NumberLocale::from_tag(tag).ok_or_else(|| ImperialError::unknown_locale(tag))?
            }
        };
        Ok(Value::Text(format_result_in(value, unit, &locale)))
    }
}

impl FunctionPlugin for FormatResult {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "format_result",
            description: "Format a value with exactly two decimals and locale separators, \
                          followed by the unit",
            usage: "format_result(value, unit, [locale])",
            args: &FORMAT_RESULT_ARGS,
            returns: "Text",
            examples: &FORMAT_RESULT_EXAMPLES,
            category: "units",
            related: &FORMAT_RESULT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(self.run(args, ctx))
    }
}

// ============ to_meters ============

pub struct ToMeters;

static TO_METERS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("unit", "Text", "Source unit"),
];

static TO_METERS_EXAMPLES: [&str; 2] = [
    "to_meters(1, \"mile\") → 1609.344",
    "to_meters(3, \"foot\") → 0.9144",
];

static TO_METERS_RELATED: [&str; 2] = ["convert", "conversion_guide"];

impl ToMeters {
    fn run(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, ImperialError> {
        check_arg_count(&self.meta(), args)?;
        let value = number_arg("to_meters", "value", &args[0])?;
        let unit = text_arg("to_meters", "unit", &args[1])?;

        let meters = Converter::new(ctx.unknown_units)
            .to_meters(value, unit)
            .map_err(unit_error_to_imperial)?;
        Ok(Value::Number(meters))
    }
}

impl FunctionPlugin for ToMeters {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "to_meters",
            description: "Convert a length to meters",
            usage: "to_meters(value, unit)",
            args: &TO_METERS_ARGS,
            returns: "Number",
            examples: &TO_METERS_EXAMPLES,
            category: "units",
            related: &TO_METERS_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(self.run(args, ctx))
    }
}

// ============ conversion_guide ============

pub struct ConversionGuide;

static GUIDE_EXAMPLES: [&str; 1] = ["conversion_guide() → [\"twip = 0.000017639 meters\", ...]"];

static GUIDE_RELATED: [&str; 2] = ["list_units", "to_meters"];

impl FunctionPlugin for ConversionGuide {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "conversion_guide",
            description: "Show how many meters each supported unit spans",
            usage: "conversion_guide()",
            args: &[],
            returns: "List",
            examples: &GUIDE_EXAMPLES,
            category: "units",
            related: &GUIDE_RELATED,
        }
    }

    fn call(&self, _args: &[Value], _ctx: &EvalContext) -> Value {
        Value::List(guide_lines().into_iter().map(Value::Text).collect())
    }
}

// ============ convert_input ============

pub struct ConvertInput;

static CONVERT_INPUT_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("input", "Text", "Value as typed by the user"),
    ArgMeta::required("from_unit", "Text", "Source unit"),
    ArgMeta::required("to_unit", "Text", "Target unit"),
];

static CONVERT_INPUT_EXAMPLES: [&str; 3] = [
    "convert_input(\"4050.2\", \"meter\", \"foot\") → \"13,288.06 foot\"",
    "convert_input(\"abc\", \"foot\", \"inch\") → null",
    "convert_input(\"-3\", \"foot\", \"inch\") → null",
];

static CONVERT_INPUT_RELATED: [&str; 2] = ["convert", "format_result"];

impl ConvertInput {
    fn run(&self, args: &[Value], ctx: &EvalContext) -> Result<Value, ImperialError> {
        check_arg_count(&self.meta(), args)?;
        let from = text_arg("convert_input", "from_unit", &args[1])?;
        let to = text_arg("convert_input", "to_unit", &args[2])?;

        let parsed = match &args[0] {
            Value::Number(n) => parse_positive_magnitude(&n.to_string()),
            other => parse_positive_magnitude(text_arg("convert_input", "input", other)?),
        };

        // Unusable input produces no result rather than an error
        let value = match parsed {
            Ok(v) => v,
            Err(reason) => {
                debug!(reason = %ImperialError::from(reason), "input skipped");
                return Ok(Value::Null);
            }
        };

        let result = Converter::new(ctx.unknown_units)
            .convert(value, from, to)
            .map_err(unit_error_to_imperial)?;
        Ok(Value::Text(format_result_in(result, to, &context_locale(ctx))))
    }
}

impl FunctionPlugin for ConvertInput {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_input",
            description: "Validate typed input, convert it, and format the result; \
                          no result for non-numeric or non-positive input",
            usage: "convert_input(input, from_unit, to_unit)",
            args: &CONVERT_INPUT_ARGS,
            returns: "Text",
            examples: &CONVERT_INPUT_EXAMPLES,
            category: "units",
            related: &CONVERT_INPUT_RELATED,
        }
    }

    fn call(&self, args: &[Value], ctx: &EvalContext) -> Value {
        into_value(self.run(args, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> EvalContext {
        EvalContext::new()
    }

    fn strict() -> EvalContext {
        EvalContext::new().with_unknown_units(UnknownUnitPolicy::Reject)
    }

    fn args(value: f64, from: &str, to: &str) -> Vec<Value> {
        vec![Value::from(value), Value::from(from), Value::from(to)]
    }

    #[test]
    fn test_convert() {
        let result = Convert.call(&args(1.0, "foot", "inch"), &ctx());
        assert!((result.as_number().unwrap() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_unknown_unit_policy() {
        let loose = Convert.call(&args(5.0, "parsec", "meter"), &ctx());
        assert_eq!(loose, Value::Number(5.0));

        let strict = Convert.call(&args(5.0, "parsec", "meter"), &strict());
        assert_eq!(strict.as_error().unwrap().code, codes::UNKNOWN_UNIT);
    }

    #[test]
    fn test_convert_argument_errors() {
        let result = Convert.call(&[Value::from(1.0)], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::ARG_COUNT);

        let call = [Value::Bool(true), Value::from("foot"), Value::from("inch")];
        let result = Convert.call(&call, &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::ARG_TYPE);
    }

    #[test]
    fn test_numeric_text_arguments() {
        let call = [Value::from(" 2 "), Value::from("yard"), Value::from("foot")];
        let result = Convert.call(&call, &ctx());
        assert!((result.as_number().unwrap() - 6.0).abs() < 1e-9);

        let call = [Value::from("abc"), Value::from("foot"), Value::from("inch")];
        let result = Convert.call(&call, &ctx());
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::PARSE_ERROR);
        assert!(err.message.contains("'abc'"));

        let result = ToMeters.call(&[Value::from("inf"), Value::from("foot")], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::NOT_FINITE);

        let result = FormatResult.call(&[Value::from(""), Value::from("foot")], &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::PARSE_ERROR);
    }

    #[test]
    fn test_list_units() {
        let result = ListUnits.call(&[], &ctx());
        let list = result.as_list().unwrap();
        assert_eq!(list.len(), 21);
        assert_eq!(list[0], Value::from("twip"));
        assert_eq!(list[19], Value::from("nautical mile"));
    }

    #[test]
    fn test_format_result() {
        let result = FormatResult.call(&[Value::from(4050.2), Value::from("foot")], &ctx());
        assert_eq!(result, Value::from("4,050.20 foot"));

        let german = ctx().with_locale("de_DE.UTF-8");
        let result = FormatResult.call(&[Value::from(4050.2), Value::from("foot")], &german);
        assert_eq!(result, Value::from("4.050,20 foot"));
    }

    #[test]
    fn test_format_result_explicit_locale() {
        let call = [Value::from(4050.2), Value::from("foot"), Value::from("it-IT")];
        assert_eq!(FormatResult.call(&call, &ctx()), Value::from("4.050,20 foot"));

        let call = [Value::from(4050.2), Value::from("foot"), Value::from("klingon")];
        let result = FormatResult.call(&call, &ctx());
        assert_eq!(result.as_error().unwrap().code, codes::UNKNOWN_LOCALE);
    }

    #[test]
    fn test_unknown_context_locale_uses_default() {
        let odd = ctx().with_locale("tlh");
        let result = FormatResult.call(&[Value::from(1234.0), Value::from("inch")], &odd);
        assert_eq!(result, Value::from("1,234.00 inch"));
    }

    #[test]
    fn test_to_meters() {
        let result = ToMeters.call(&[Value::from(1.0), Value::from("mile")], &ctx());
        assert!((result.as_number().unwrap() - 1609.344).abs() < 1e-9);

        let result = ToMeters.call(&[Value::from(1.0), Value::from("miles")], &strict());
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::UNKNOWN_UNIT);
        assert!(err.suggestion.as_ref().unwrap().contains("mile"));
    }

    #[test]
    fn test_conversion_guide() {
        let result = ConversionGuide.call(&[], &ctx());
        let lines = result.as_list().unwrap();
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[12], Value::from("foot = 0.3048 meters"));
    }

    #[test]
    fn test_convert_input() {
        let call = [Value::from("4050.2"), Value::from("meter"), Value::from("foot")];
        assert_eq!(ConvertInput.call(&call, &ctx()), Value::from("13,288.06 foot"));

        let call = [Value::from(" 1 "), Value::from("foot"), Value::from("inch")];
        assert_eq!(ConvertInput.call(&call, &ctx()), Value::from("12.00 inch"));

        let call = [Value::from(2.0), Value::from("yard"), Value::from("foot")];
        assert_eq!(ConvertInput.call(&call, &ctx()), Value::from("6.00 foot"));
    }

    #[test]
    fn test_convert_input_skips_unusable_values() {
        for input in ["abc", "", "0", "-3", "NaN"] {
            let call = [Value::from(input), Value::from("foot"), Value::from("inch")];
            assert_eq!(ConvertInput.call(&call, &ctx()), Value::Null, "input {:?}", input);
        }
    }

    #[test]
    fn test_convert_input_strict_unit() {
        let call = [Value::from("2"), Value::from("feet"), Value::from("inch")];
        let result = ConvertInput.call(&call, &strict());
        assert_eq!(result.as_error().unwrap().code, codes::UNKNOWN_UNIT);
    }
}
