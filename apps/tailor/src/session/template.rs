use serde::Serialize;

/// Resume layouts the preview can switch between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Template {
    #[default]
    #[serde(rename = "FAANG")]
    Faang,
    Serif,
    Compact,
    Modern,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::Faang,
        Template::Serif,
        Template::Compact,
        Template::Modern,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Template::Faang => "FAANG",
            Template::Serif => "Serif",
            Template::Compact => "Compact",
            Template::Modern => "Modern",
        }
    }

    /// Unknown names resolve to the default layout.
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == name)
            .unwrap_or_default()
    }
}
