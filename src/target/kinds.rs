//! Type tags used by query targets
//!
//! Every tag round-trips through the exact string the broker expects
//! (`"groupBy"`, `"longSum"`, `"fifteen_minute"`, ...). Targets store the raw
//! string so that an unknown tag typed by a user survives until validation
//! reports it; these enums are the closed set of tags the editor understands.

macro_rules! named_kinds {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// All variants in picker order
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Wire name of this tag
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parse from the exact wire name
            pub fn parse_name(s: &str) -> Option<Self> {
                match s {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Wire names of all variants in picker order
            pub fn names() -> Vec<&'static str> {
                Self::ALL.iter().map(|kind| kind.as_str()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_kinds! {
    /// Native query types the editor can build
    QueryType {
        Timeseries => "timeseries",
        GroupBy => "groupBy",
        TopN => "topN",
        Scan => "scan",
    }
}

named_kinds! {
    /// Dimension filter types
    FilterType {
        Selector => "selector",
        Regex => "regex",
        Javascript => "javascript",
    }
}

named_kinds! {
    /// Aggregator types
    AggregatorType {
        Count => "count",
        Cardinality => "cardinality",
        LongSum => "longSum",
        DoubleSum => "doubleSum",
        FloatSum => "floatSum",
        LongMin => "longMin",
        DoubleMin => "doubleMin",
        FloatMin => "floatMin",
        LongMax => "longMax",
        DoubleMax => "doubleMax",
        FloatMax => "floatMax",
        LongFirst => "longFirst",
        DoubleFirst => "doubleFirst",
        FloatFirst => "floatFirst",
        StringFirst => "stringFirst",
        StringLast => "stringLast",
        ApproxHistogramFold => "approxHistogramFold",
        HyperUnique => "hyperUnique",
        ThetaSketch => "thetaSketch",
    }
}

named_kinds! {
    /// Post-aggregator types
    PostAggregatorType {
        Arithmetic => "arithmetic",
        Max => "max",
        Min => "min",
        Quantile => "quantile",
    }
}

named_kinds! {
    /// Functions accepted by the arithmetic post-aggregator
    ArithmeticFn {
        Plus => "+",
        Minus => "-",
        Multiply => "*",
        Divide => "/",
        Quotient => "quotient",
    }
}

named_kinds! {
    /// Result orderings for the arithmetic post-aggregator
    ArithmeticOrdering {
        /// Broker default ordering
        Null => "null",
        /// NaN and infinities sort first
        NumericFirst => "numericFirst",
    }
}

named_kinds! {
    /// Granularities accepted when the panel interval is overridden
    Granularity {
        Second => "second",
        Minute => "minute",
        FifteenMinute => "fifteen_minute",
        ThirtyMinute => "thirty_minute",
        Hour => "hour",
        Day => "day",
        Week => "week",
        Month => "month",
        Quarter => "quarter",
        Year => "year",
        All => "all",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for kind in AggregatorType::ALL {
            assert_eq!(AggregatorType::parse_name(kind.as_str()), Some(*kind));
        }
        assert_eq!(QueryType::parse_name("topN"), Some(QueryType::TopN));
        assert_eq!(Granularity::parse_name("fifteen_minute"), Some(Granularity::FifteenMinute));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(QueryType::parse_name("groupby"), None);
        assert_eq!(FilterType::parse_name("Selector"), None);
        assert_eq!(Granularity::parse_name("HOUR"), None);
    }

    #[test]
    fn test_picker_order() {
        assert_eq!(QueryType::names(), vec!["timeseries", "groupBy", "topN", "scan"]);
        assert_eq!(ArithmeticFn::names(), vec!["+", "-", "*", "/", "quotient"]);
        assert_eq!(AggregatorType::ALL.len(), 19);
        assert_eq!(Granularity::ALL.len(), 11);
    }
}
