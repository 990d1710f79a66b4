//! Severity of makemkvcon messages.
//!
//! Levels were assigned per message from the english string table shipped
//! with makemkv-oss (`makemkvgui/src/str/en_utf16.cpp`). Codes missing from
//! the table are treated as debug chatter.

use std::fmt::Display;

/// Severity tier of a message code, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    /// makemkvcon hit a problem it cannot recover from.
    Critical,
}

impl Severity {
    /// Resolves the severity of a message code.
    pub const fn of(code: u32) -> Self {
        match code {
            5010 | 5080 => Severity::Critical,

            1008..=1010 | 2001 | 2003..=2004 | 2006..=2007 | 2013 | 2016 | 2018..=2019
            | 2022..=2023 | 2200 | 2204..=2207 | 2209..=2210 | 2300..=2304 | 2400..=2402
            | 2404 | 3000 | 3010 | 3323 | 3325 | 3331 | 4041..=4045 | 4054 | 5003
            | 5006..=5009 | 5016 | 5020..=5022 | 5043 | 5069 => Severity::Error,

            1007 | 2008..=2009 | 2011..=2012 | 2015 | 2017 | 2020..=2021 | 2024 | 2201..=2203
            | 2208 | 2211 | 3001..=3005 | 3008..=3009 | 3015 | 3019..=3024 | 3026
            | 3031..=3033 | 3035..=3036 | 3039 | 3041..=3043 | 3221 | 3301 | 3303 | 3306
            | 3310..=3316 | 3318..=3321 | 3327 | 3329..=3330 | 3333..=3337 | 3339..=3340
            | 3342..=3343 | 3345..=3347 | 4003..=4004 | 4007..=4009 | 4020..=4028 | 4040
            | 4046..=4051 | 4053 | 4055 | 4060..=4062 | 5000..=5001 | 5004 | 5013
            | 5037..=5042 | 5051..=5056 | 5058 | 5068 | 5071 | 5073 | 5075..=5079
            | 5082..=5084 | 5101 => Severity::Warning,

            2010 | 2014 | 3006..=3007 | 3011..=3014 | 3016..=3018 | 3025 | 3027..=3030 | 3034
            | 3037..=3038 | 3040 | 3220 | 3300 | 3302 | 3304..=3305 | 3307..=3309 | 3317
            | 3322 | 3324 | 3326 | 3328 | 3332 | 3338 | 3341 | 3344 | 4001..=4002 | 4052
            | 5002 | 5005 | 5011..=5012 | 5014..=5015 | 5017..=5019 | 5024 | 5036 | 5070
            | 5072 | 5074 | 5081 | 5094 => Severity::Info,

            // 1000-1006, 31xx, 32xx, 34xx and friends are debug output
            _ => Severity::Debug,
        }
    }

    /// Level used when forwarding a message to the `log` facade.
    pub const fn log_level(self) -> log::Level {
        match self {
            Severity::Debug => log::Level::Debug,
            Severity::Info => log::Level::Info,
            Severity::Warning => log::Level::Warn,
            Severity::Error | Severity::Critical => log::Level::Error,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Debug => write!(f, "debug"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}
