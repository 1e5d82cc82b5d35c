//! Answers - The fixed option sets collected by the dialog
//!
//! Every question in the dialog is a single choice from a small, closed set.
//! Each option carries the label the dialog shows and parses back from it,
//! so form values round-trip without string matching in the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A form value that does not name any option of the expected set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} option: {value:?}")]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $(#[$meta])*
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every option, in the order the dialog lists them.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The label shown to the user.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = ParseOptionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|opt| opt.label().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ParseOptionError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }
    };
}

option_set! {
    /// "Did you find this job with us?"
    #[serde(rename_all = "snake_case")]
    YesNo as "yes/no" {
        Yes => "Yes",
        No => "No",
    }
}

option_set! {
    /// Count bands for roles applied to and companies emailed.
    ActivityBand as "activity" {
        #[serde(rename = "0")]
        Zero => "0",
        #[serde(rename = "1-5")]
        OneToFive => "1-5",
        #[serde(rename = "6-20")]
        SixToTwenty => "6-20",
        #[serde(rename = "20+")]
        OverTwenty => "20+",
    }
}

option_set! {
    /// Count bands for companies interviewed with.
    InterviewBand as "interview" {
        #[serde(rename = "0")]
        Zero => "0",
        #[serde(rename = "1-2")]
        OneToTwo => "1-2",
        #[serde(rename = "3-5")]
        ThreeToFive => "3-5",
        #[serde(rename = "5+")]
        OverFive => "5+",
    }
}

option_set! {
    /// Why a user who is still looking cancels anyway.
    #[serde(rename_all = "snake_case")]
    CancelReason as "cancel reason" {
        TooExpensive => "Too expensive",
        PlatformNotHelpful => "Platform not helpful",
        NotManyRelevantJobs => "Not many relevant jobs",
        DecidedNotToMove => "Decided not to move",
        Other => "Other",
    }
}

/// The four-question questionnaire shown to users who found a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobAnswers {
    pub found_with_service: Option<YesNo>,
    pub roles_applied: Option<ActivityBand>,
    pub companies_emailed: Option<ActivityBand>,
    pub companies_interviewed: Option<InterviewBand>,
}

impl JobAnswers {
    pub fn is_complete(&self) -> bool {
        self.found_with_service.is_some()
            && self.roles_applied.is_some()
            && self.companies_emailed.is_some()
            && self.companies_interviewed.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The three job-search questions a user who declined the offer may answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchAnswers {
    pub roles_applied: Option<ActivityBand>,
    pub companies_emailed: Option<ActivityBand>,
    pub companies_interviewed: Option<InterviewBand>,
}

impl SearchAnswers {
    pub fn is_complete(&self) -> bool {
        self.roles_applied.is_some()
            && self.companies_emailed.is_some()
            && self.companies_interviewed.is_some()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
