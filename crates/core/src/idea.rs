use serde::{Deserialize, Serialize};

/// One of the three inputs on the playground form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaField {
    Topic,
    Features,
    Style,
}

impl IdeaField {
    /// Form order.
    pub const ALL: [IdeaField; 3] = [IdeaField::Topic, IdeaField::Features, IdeaField::Style];

    /// Label shown next to the input and in warnings.
    pub fn label(self) -> &'static str {
        match self {
            IdeaField::Topic => "What do you want to make?",
            IdeaField::Features => "What should it do?",
            IdeaField::Style => "What colors and look do you like?",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IdeaField::Topic => "topic",
            IdeaField::Features => "features",
            IdeaField::Style => "style",
        }
    }
}

/// Raised when one or more form fields are blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingInput {
    pub fields: Vec<IdeaField>,
}

impl std::fmt::Display for MissingInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.fields.iter().map(|field| field.name()).collect();
        write!(f, "Please fill in every box! Missing: {}", names.join(", "))
    }
}

impl std::error::Error for MissingInput {}

/// The raw form values exactly as the user typed them.
///
/// Kept separately from [`UserIdea`] so a failed interaction can echo the
/// user's input back untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaForm {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub features: String,
    #[serde(default)]
    pub style: String,
}

impl IdeaForm {
    pub fn value(&self, field: IdeaField) -> &str {
        match field {
            IdeaField::Topic => &self.topic,
            IdeaField::Features => &self.features,
            IdeaField::Style => &self.style,
        }
    }

    /// Validate the form into a [`UserIdea`].
    pub fn validate(&self) -> Result<UserIdea, MissingInput> {
        UserIdea::validate(&self.topic, &self.features, &self.style)
    }
}

/// A validated idea: all three fields are non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdea {
    topic: String,
    features: String,
    style: String,
}

impl UserIdea {
    /// Build an idea from the three inputs.
    ///
    /// A field holding only whitespace counts as missing. Every missing field
    /// is reported, in form order. Values are kept verbatim otherwise.
    pub fn validate(topic: &str, features: &str, style: &str) -> Result<Self, MissingInput> {
        let values = [topic, features, style];
        let fields: Vec<IdeaField> = IdeaField::ALL
            .iter()
            .zip(values.iter())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| *field)
            .collect();

        if !fields.is_empty() {
            return Err(MissingInput { fields });
        }

        Ok(Self {
            topic: topic.to_string(),
            features: features.to_string(),
            style: style.to_string(),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn features(&self) -> &str {
        &self.features
    }

    pub fn style(&self) -> &str {
        &self.style
    }
}
