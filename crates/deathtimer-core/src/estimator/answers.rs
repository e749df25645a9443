//! Lifestyle quiz answers as closed enumerations.
//!
//! Every question gets its own enum; each variant carries the option text
//! shown in the quiz, a short CLI slug, and its life expectancy adjustment
//! in whole years.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One option of a lifestyle question.
pub trait Choice: Copy + Sized + 'static {
    /// Question the option answers.
    const QUESTION: LifestyleQuestion;
    /// All options in quiz order.
    const ALL: &'static [Self];
    /// Option texts in quiz order.
    const LABELS: &'static [&'static str];

    /// Option text as shown in the quiz.
    fn label(self) -> &'static str;
    /// Short identifier accepted on the command line.
    fn slug(self) -> &'static str;
    /// Adjustment to the base life expectancy.
    fn years(self) -> i32;

    /// Exact match on the option text.
    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.label() == label)
    }

    /// Matches the option text case-insensitively, or the slug.
    fn parse_loose(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.slug() == input || c.label().eq_ignore_ascii_case(input))
    }
}

/// Error returned by the `FromStr` impls of the answer enums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice {
    pub question: LifestyleQuestion,
    pub input: String,
}

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not an option for \"{}\" (expected one of: {})",
            self.input,
            self.question.text(),
            self.question.options().join(", ")
        )
    }
}

impl std::error::Error for UnknownChoice {}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident for $question:ident {
            $($variant:ident => ($label:literal, $slug:literal, $years:expr)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl Choice for $name {
            const QUESTION: LifestyleQuestion = LifestyleQuestion::$question;
            const ALL: &'static [Self] = &[$(Self::$variant),+];
            const LABELS: &'static [&'static str] = &[$($label),+];

            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            fn slug(self) -> &'static str {
                match self {
                    $(Self::$variant => $slug,)+
                }
            }

            fn years(self) -> i32 {
                match self {
                    $(Self::$variant => $years,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_loose(s).ok_or_else(|| UnknownChoice {
                    question: LifestyleQuestion::$question,
                    input: s.to_string(),
                })
            }
        }
    };
}

choice_enum! {
    /// Biological sex.
    BiologicalSex for Sex {
        Male => ("Male", "male", 0),
        Female => ("Female", "female", 8),
    }
}

choice_enum! {
    /// Self-rated overall health.
    OverallHealth for Health {
        Excellent => ("Excellent", "excellent", 10),
        Good => ("Good", "good", 5),
        Fair => ("Fair", "fair", -5),
        Poor => ("Poor", "poor", -10),
    }
}

choice_enum! {
    /// Exercise frequency.
    Exercise for Exercise {
        Daily => ("Daily", "daily", 8),
        ThreeToFourWeekly => ("3-4 times a week", "3-4-weekly", 5),
        OneToTwoWeekly => ("1-2 times a week", "1-2-weekly", 2),
        Rarely => ("Rarely", "rarely", -5),
    }
}

choice_enum! {
    Diet for Diet {
        VeryHealthy => ("Very healthy", "very-healthy", 8),
        ModeratelyHealthy => ("Moderately healthy", "moderately-healthy", 4),
        SomewhatUnhealthy => ("Somewhat unhealthy", "somewhat-unhealthy", -4),
        VeryUnhealthy => ("Very unhealthy", "very-unhealthy", -8),
    }
}

choice_enum! {
    /// Typical hours of sleep per night.
    Sleep for Sleep {
        EightPlus => ("8+ hours", "8-plus", 6),
        SixToSeven => ("6-7 hours", "6-7", 2),
        FourToFive => ("4-5 hours", "4-5", -4),
        UnderFour => ("Less than 4 hours", "under-4", -8),
    }
}

choice_enum! {
    Smoking for Smoking {
        Never => ("Never", "never", 5),
        Occasionally => ("Occasionally", "occasionally", -5),
        Regularly => ("Regularly", "regularly", -10),
        Heavy => ("Heavy smoker", "heavy", -15),
    }
}

choice_enum! {
    Alcohol for Alcohol {
        Never => ("Never", "never", 5),
        Occasionally => ("Occasionally", "occasionally", 0),
        Weekly => ("Weekly", "weekly", -5),
        Daily => ("Daily", "daily", -10),
    }
}

choice_enum! {
    /// Self-rated stress level.
    Stress for Stress {
        VeryLow => ("Very low", "very-low", 6),
        Moderate => ("Moderate", "moderate", 0),
        High => ("High", "high", -4),
        VeryHigh => ("Very high", "very-high", -8),
    }
}

choice_enum! {
    /// Number of chronic health conditions.
    ChronicConditions for Conditions {
        None => ("None", "none", 5),
        One => ("One", "one", -4),
        Two => ("Two", "two", -8),
        ThreeOrMore => ("Three or more", "three-plus", -12),
    }
}

choice_enum! {
    /// Longevity among relatives.
    FamilyLongevity for FamilyHistory {
        ManyPast90 => ("Yes, many lived past 90", "many-past-90", 10),
        MostPast80 => ("Yes, most lived past 80", "most-past-80", 6),
        Average => ("Average lifespan", "average", 0),
        BelowAverage => ("Below average lifespan", "below-average", -6),
    }
}

/// The ten scored lifestyle questions, in quiz order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifestyleQuestion {
    Sex,
    Health,
    Exercise,
    Diet,
    Sleep,
    Smoking,
    Alcohol,
    Stress,
    Conditions,
    FamilyHistory,
}

impl LifestyleQuestion {
    pub const ALL: [LifestyleQuestion; 10] = [
        Self::Sex,
        Self::Health,
        Self::Exercise,
        Self::Diet,
        Self::Sleep,
        Self::Smoking,
        Self::Alcohol,
        Self::Stress,
        Self::Conditions,
        Self::FamilyHistory,
    ];

    pub fn text(self) -> &'static str {
        match self {
            Self::Sex => "What is your biological sex?",
            Self::Health => "How would you rate your overall health?",
            Self::Exercise => "How often do you exercise?",
            Self::Diet => "How would you describe your diet?",
            Self::Sleep => "How many hours of sleep do you typically get?",
            Self::Smoking => "Do you smoke?",
            Self::Alcohol => "How often do you consume alcohol?",
            Self::Stress => "How would you rate your stress levels?",
            Self::Conditions => "Do you have any chronic health conditions?",
            Self::FamilyHistory => "Is there a history of longevity in your family?",
        }
    }

    pub fn options(self) -> &'static [&'static str] {
        match self {
            Self::Sex => BiologicalSex::LABELS,
            Self::Health => OverallHealth::LABELS,
            Self::Exercise => Exercise::LABELS,
            Self::Diet => Diet::LABELS,
            Self::Sleep => Sleep::LABELS,
            Self::Smoking => Smoking::LABELS,
            Self::Alcohol => Alcohol::LABELS,
            Self::Stress => Stress::LABELS,
            Self::Conditions => ChronicConditions::LABELS,
            Self::FamilyHistory => FamilyLongevity::LABELS,
        }
    }

    /// Option text matching `input` by label (any case) or slug.
    pub fn match_option(self, input: &str) -> Option<&'static str> {
        fn loose<C: Choice>(input: &str) -> Option<&'static str> {
            C::parse_loose(input).map(Choice::label)
        }

        match self {
            Self::Sex => loose::<BiologicalSex>(input),
            Self::Health => loose::<OverallHealth>(input),
            Self::Exercise => loose::<Exercise>(input),
            Self::Diet => loose::<Diet>(input),
            Self::Sleep => loose::<Sleep>(input),
            Self::Smoking => loose::<Smoking>(input),
            Self::Alcohol => loose::<Alcohol>(input),
            Self::Stress => loose::<Stress>(input),
            Self::Conditions => loose::<ChronicConditions>(input),
            Self::FamilyHistory => loose::<FamilyLongevity>(input),
        }
    }
}

/// One scored answer in an estimate breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub question: LifestyleQuestion,
    pub answer: String,
    pub years: i32,
}

/// Answers to the ten lifestyle questions.
///
/// `None` means the question was not answered and adds nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifestyleAnswers {
    #[serde(default)]
    pub sex: Option<BiologicalSex>,
    #[serde(default)]
    pub health: Option<OverallHealth>,
    #[serde(default)]
    pub exercise: Option<Exercise>,
    #[serde(default)]
    pub diet: Option<Diet>,
    #[serde(default)]
    pub sleep: Option<Sleep>,
    #[serde(default)]
    pub smoking: Option<Smoking>,
    #[serde(default)]
    pub alcohol: Option<Alcohol>,
    #[serde(default)]
    pub stress: Option<Stress>,
    #[serde(default)]
    pub conditions: Option<ChronicConditions>,
    #[serde(default)]
    pub family_history: Option<FamilyLongevity>,
}

impl LifestyleAnswers {
    /// Builds answers from option texts given in question order.
    ///
    /// Texts that match no option of their question are dropped, as are
    /// texts beyond the tenth.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut answers = Self::default();
        for (question, label) in LifestyleQuestion::ALL.into_iter().zip(labels) {
            let label = label.as_ref();
            if !answers.set_label(question, label) {
                tracing::debug!(?question, label, "unrecognized answer, no adjustment");
            }
        }
        answers
    }

    /// Sets one answer from its exact option text. Returns `false` (leaving
    /// the answer untouched) when the text is not an option.
    pub fn set_label(&mut self, question: LifestyleQuestion, label: &str) -> bool {
        fn put<C: Choice>(slot: &mut Option<C>, label: &str) -> bool {
            match C::from_label(label) {
                Some(choice) => {
                    *slot = Some(choice);
                    true
                }
                None => false,
            }
        }

        match question {
            LifestyleQuestion::Sex => put(&mut self.sex, label),
            LifestyleQuestion::Health => put(&mut self.health, label),
            LifestyleQuestion::Exercise => put(&mut self.exercise, label),
            LifestyleQuestion::Diet => put(&mut self.diet, label),
            LifestyleQuestion::Sleep => put(&mut self.sleep, label),
            LifestyleQuestion::Smoking => put(&mut self.smoking, label),
            LifestyleQuestion::Alcohol => put(&mut self.alcohol, label),
            LifestyleQuestion::Stress => put(&mut self.stress, label),
            LifestyleQuestion::Conditions => put(&mut self.conditions, label),
            LifestyleQuestion::FamilyHistory => put(&mut self.family_history, label),
        }
    }

    /// Clears one answer.
    pub fn clear(&mut self, question: LifestyleQuestion) {
        match question {
            LifestyleQuestion::Sex => self.sex = None,
            LifestyleQuestion::Health => self.health = None,
            LifestyleQuestion::Exercise => self.exercise = None,
            LifestyleQuestion::Diet => self.diet = None,
            LifestyleQuestion::Sleep => self.sleep = None,
            LifestyleQuestion::Smoking => self.smoking = None,
            LifestyleQuestion::Alcohol => self.alcohol = None,
            LifestyleQuestion::Stress => self.stress = None,
            LifestyleQuestion::Conditions => self.conditions = None,
            LifestyleQuestion::FamilyHistory => self.family_history = None,
        }
    }

    /// Scored answers in question order; unanswered questions are skipped.
    pub fn contributions(&self) -> Vec<Contribution> {
        fn entry<C: Choice>(choice: Option<C>) -> Option<Contribution> {
            choice.map(|c| Contribution {
                question: C::QUESTION,
                answer: c.label().to_string(),
                years: c.years(),
            })
        }

        [
            entry(self.sex),
            entry(self.health),
            entry(self.exercise),
            entry(self.diet),
            entry(self.sleep),
            entry(self.smoking),
            entry(self.alcohol),
            entry(self.stress),
            entry(self.conditions),
            entry(self.family_history),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Sum of all adjustments.
    pub fn total_adjustment(&self) -> i32 {
        self.contributions().iter().map(|c| c.years).sum()
    }
}
