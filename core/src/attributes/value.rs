use std::fmt;

/// An attribute value as it is handed to the downstream serializer. Numbers
/// are carried in their decimal text form.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AttributeValue {
    /// A numeric value. Integers are widened into this variant too.
    Double(String),
    String(String),
}

impl AttributeValue {
    /// Returns the value's text form
    pub fn as_str(&self) -> &str {
        match self {
            AttributeValue::Double(s) | AttributeValue::String(s) => s,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Double(s) => f.write_str(s),
            AttributeValue::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.into())
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        AttributeValue::Double(value.to_string())
    }
}

impl From<f64> for AttributeValue {
    /// Uses the shortest representation that parses back to the same `f64`.
    /// Very large and very small magnitudes are written with an exponent.
    fn from(value: f64) -> Self {
        let mut buf = ryu::Buffer::new();
        let s = buf.format(value);
        AttributeValue::Double(s.strip_suffix(".0").unwrap_or(s).to_string())
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion};

    use super::AttributeValue;

    #[test]
    fn shortest_float_text() {
        assert_that!(AttributeValue::from(3.5)).is_equal_to(AttributeValue::Double("3.5".into()));
        assert_that!(AttributeValue::from(0.1)).is_equal_to(AttributeValue::Double("0.1".into()));
        assert_that!(AttributeValue::from(-2.0)).is_equal_to(AttributeValue::Double("-2".into()));
    }

    #[test]
    fn exponent_float_text() {
        let text = |v: f64| AttributeValue::from(v).as_str().to_string();
        assert_that!(text(1e300)).is_equal_to("1e300".to_string());
        assert_that!(text(1e21)).is_equal_to("1e21".to_string());
        assert_that!(text(f64::MAX)).is_equal_to("1.7976931348623157e308".to_string());
        assert_that!(text(1e-7)).is_equal_to("1e-7".to_string());
        assert_that!(text(-2.5e-10)).is_equal_to("-2.5e-10".to_string());

        // smallest subnormal
        assert_that!(text(5e-324)).is_equal_to("5e-324".to_string());
        assert_that!(text(5e-324).parse::<f64>().unwrap()).is_equal_to(5e-324);
    }

    /// Integers share the numeric variant with floats on purpose
    #[test]
    fn integers_are_widened() {
        assert_that!(AttributeValue::from(42u64)).is_equal_to(AttributeValue::Double("42".into()));
        assert_that!(AttributeValue::from(u64::MAX))
            .is_equal_to(AttributeValue::Double("18446744073709551615".into()));
    }

    #[test]
    fn display() {
        assert_that!(AttributeValue::from(1.25).to_string()).is_equal_to("1.25".to_string());
        assert_that!(AttributeValue::from("a b").to_string()).is_equal_to("\"a b\"".to_string());
    }
}
