use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// One CSV row as read from disk, before any validation.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "PassengerId")]
    pub passenger_id: Option<String>,
    #[serde(rename = "Survived")]
    pub survived: Option<String>,
    #[serde(rename = "Pclass")]
    pub pclass: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Sex")]
    pub sex: Option<String>,
    #[serde(rename = "Age")]
    pub age: Option<String>,
    #[serde(rename = "SibSp")]
    pub sib_sp: Option<String>,
    #[serde(rename = "Parch")]
    pub parch: Option<String>,
    #[serde(rename = "Ticket")]
    pub ticket: Option<String>,
    #[serde(rename = "Fare")]
    pub fare: Option<String>,
    #[serde(rename = "Cabin")]
    pub cabin: Option<String>,
    #[serde(rename = "Embarked")]
    pub embarked: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Port {
    C,
    Q,
    S,
}

impl Port {
    pub const ALL: [Port; 3] = [Port::C, Port::Q, Port::S];

    pub fn parse(s: &str) -> Option<Port> {
        match s.trim() {
            "C" => Some(Port::C),
            "Q" => Some(Port::Q),
            "S" => Some(Port::S),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Port::C => "C",
            Port::Q => "Q",
            Port::S => "S",
        }
    }

    pub fn town(self) -> &'static str {
        match self {
            Port::C => "Cherbourg",
            Port::Q => "Queenstown",
            Port::S => "Southampton",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Title {
    Mr,
    Miss,
    Mrs,
    Master,
    Other,
}

impl Title {
    /// Maps a raw honorific onto the closed set; anything uncommon is `Other`.
    pub fn normalize(raw: &str) -> Title {
        match raw {
            "Mr" => Title::Mr,
            "Miss" => Title::Miss,
            "Mrs" => Title::Mrs,
            "Master" => Title::Master,
            _ => Title::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Title::Mr => "Mr",
            Title::Miss => "Miss",
            Title::Mrs => "Mrs",
            Title::Master => "Master",
            Title::Other => "Other",
        }
    }
}

/// Every column a passenger can be queried on, loaded or derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    PassengerId,
    Survived,
    Pclass,
    Name,
    Sex,
    Age,
    SibSp,
    Parch,
    Ticket,
    Fare,
    Cabin,
    Embarked,
    Title,
    FamilySize,
    IsAlone,
}

impl Feature {
    pub const REQUIRED: [Feature; 9] = [
        Feature::Survived,
        Feature::Pclass,
        Feature::Name,
        Feature::Sex,
        Feature::Age,
        Feature::SibSp,
        Feature::Parch,
        Feature::Fare,
        Feature::Embarked,
    ];

    /// Column order of a processed record, used by the overview and the
    /// missing-value report.
    pub const ALL: [Feature; 15] = [
        Feature::PassengerId,
        Feature::Survived,
        Feature::Pclass,
        Feature::Name,
        Feature::Sex,
        Feature::Age,
        Feature::SibSp,
        Feature::Parch,
        Feature::Ticket,
        Feature::Fare,
        Feature::Cabin,
        Feature::Embarked,
        Feature::Title,
        Feature::FamilySize,
        Feature::IsAlone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::PassengerId => "PassengerId",
            Feature::Survived => "Survived",
            Feature::Pclass => "Pclass",
            Feature::Name => "Name",
            Feature::Sex => "Sex",
            Feature::Age => "Age",
            Feature::SibSp => "SibSp",
            Feature::Parch => "Parch",
            Feature::Ticket => "Ticket",
            Feature::Fare => "Fare",
            Feature::Cabin => "Cabin",
            Feature::Embarked => "Embarked",
            Feature::Title => "Title",
            Feature::FamilySize => "FamilySize",
            Feature::IsAlone => "IsAlone",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Feature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// A validated passenger. Derived fields stay `None` until preprocessing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Passenger {
    pub passenger_id: Option<u32>,
    pub survived: bool,
    pub pclass: u8,
    pub name: String,
    pub sex: String,
    pub age: Option<f64>,
    pub sib_sp: u32,
    pub parch: u32,
    pub ticket: Option<String>,
    pub fare: Option<f64>,
    pub cabin: Option<String>,
    pub embarked: Option<Port>,
    pub title: Option<Title>,
    pub family_size: Option<u32>,
    pub is_alone: Option<bool>,
}

impl Passenger {
    /// Numeric view of a feature; `None` when missing or not numeric.
    pub fn numeric(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::PassengerId => self.passenger_id.map(f64::from),
            Feature::Survived => Some(if self.survived { 1.0 } else { 0.0 }),
            Feature::Pclass => Some(f64::from(self.pclass)),
            Feature::Age => self.age.filter(|a| a.is_finite()),
            Feature::SibSp => Some(f64::from(self.sib_sp)),
            Feature::Parch => Some(f64::from(self.parch)),
            Feature::Fare => self.fare.filter(|f| f.is_finite()),
            Feature::FamilySize => self.family_size.map(f64::from),
            Feature::IsAlone => self.is_alone.map(|a| if a { 1.0 } else { 0.0 }),
            Feature::Name
            | Feature::Sex
            | Feature::Ticket
            | Feature::Cabin
            | Feature::Embarked
            | Feature::Title => None,
        }
    }

    /// Category label of a feature, typed per column; `None` when missing.
    pub fn category(&self, feature: Feature) -> Option<String> {
        let label = match feature {
            Feature::Survived => (if self.survived { "1" } else { "0" }).to_string(),
            Feature::Pclass => self.pclass.to_string(),
            Feature::Name => self.name.clone(),
            Feature::Sex => self.sex.clone(),
            Feature::Ticket => self.ticket.clone()?,
            Feature::Cabin => self.cabin.clone()?,
            Feature::Embarked => self.embarked?.code().to_string(),
            Feature::Title => self.title?.as_str().to_string(),
            Feature::IsAlone => (if self.is_alone? { "1" } else { "0" }).to_string(),
            Feature::PassengerId
            | Feature::Age
            | Feature::SibSp
            | Feature::Parch
            | Feature::Fare
            | Feature::FamilySize => {
                let v = self.numeric(feature)?;
                format!("{}", v)
            }
        };
        if label.is_empty() {
            None
        } else {
            Some(label)
        }
    }

    pub fn is_missing(&self, feature: Feature) -> bool {
        match feature {
            Feature::Name
            | Feature::Sex
            | Feature::Ticket
            | Feature::Cabin
            | Feature::Embarked
            | Feature::Title => self.category(feature).is_none(),
            _ => self.numeric(feature).is_none(),
        }
    }
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MissingValueRow {
    #[serde(rename = "Feature")]
    #[tabled(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "MissingValues")]
    #[tabled(rename = "Missing Values")]
    pub missing: usize,
    #[serde(rename = "Percentage")]
    #[tabled(rename = "Percentage")]
    pub percentage: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct StatsRow {
    #[serde(rename = "Feature")]
    #[tabled(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Mean")]
    #[tabled(rename = "Mean")]
    pub mean: String,
    #[serde(rename = "Median")]
    #[tabled(rename = "Median")]
    pub median: String,
    #[serde(rename = "Min")]
    #[tabled(rename = "Min")]
    pub min: String,
    #[serde(rename = "Max")]
    #[tabled(rename = "Max")]
    pub max: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CategoryRateRow {
    #[serde(rename = "Feature")]
    #[tabled(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Category")]
    #[tabled(rename = "Category")]
    pub category: String,
    #[serde(rename = "Total")]
    #[tabled(rename = "Total")]
    pub total: usize,
    #[serde(rename = "SurvivalRate")]
    #[tabled(rename = "Survival Rate")]
    pub rate: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct FeatureImpactRow {
    #[serde(rename = "Feature")]
    #[tabled(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "RateRange")]
    #[tabled(rename = "Survival Rate Range")]
    pub rate_range: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct NumericShiftRow {
    #[serde(rename = "Feature")]
    #[tabled(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "SurvivedMean")]
    #[tabled(rename = "Survived Mean")]
    pub survived_mean: String,
    #[serde(rename = "OverallMean")]
    #[tabled(rename = "Overall Mean")]
    pub overall_mean: String,
    #[serde(rename = "Difference")]
    #[tabled(rename = "Difference from Mean")]
    pub difference: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CorrelationRow {
    #[serde(rename = "Feature")]
    #[tabled(rename = "Feature")]
    pub feature: String,
    #[serde(rename = "Coefficient")]
    #[tabled(rename = "Correlation")]
    pub coefficient: String,
    #[serde(rename = "Samples")]
    #[tabled(rename = "Samples")]
    pub samples: usize,
    #[serde(rename = "Note")]
    #[tabled(rename = "Note")]
    pub note: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct OutcomeCountRow {
    #[serde(rename = "Group")]
    #[tabled(rename = "Group")]
    pub group: String,
    #[serde(rename = "Survived")]
    #[tabled(rename = "Survived")]
    pub survived: usize,
    #[serde(rename = "Perished")]
    #[tabled(rename = "Perished")]
    pub perished: usize,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PortRateRow {
    #[serde(rename = "Port")]
    #[tabled(rename = "Port")]
    pub port: String,
    #[serde(rename = "Passengers")]
    #[tabled(rename = "Passengers")]
    pub passengers: usize,
    #[serde(rename = "SurvivalRate")]
    #[tabled(rename = "Survival Rate")]
    pub rate: String,
}
