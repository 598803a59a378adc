use chrono::{DateTime, Local, Timelike};
use render_device::SampleCount;

/// A placeholder recognised in file name templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    /// `{scene}`, the active scene name.
    Scene,

    /// `{camera}`, the captured camera's name.
    Camera,

    /// `{samples}`, `MSAA` followed by the requested sample count.
    Samples,

    /// `{date}`, the local date as `YYYY-MM-DD`.
    Date,

    /// `{time}`, the local time as `H-MM-SS.f`.
    Time,
}

impl Placeholder {
    /// Every placeholder.
    pub const ALL: [Self; 5] = [
        Self::Scene,
        Self::Camera,
        Self::Samples,
        Self::Date,
        Self::Time,
    ];

    /// The literal token in a template.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Scene => "{scene}",
            Self::Camera => "{camera}",
            Self::Samples => "{samples}",
            Self::Date => "{date}",
            Self::Time => "{time}",
        }
    }
}

/// Values substituted into a file name template.
#[derive(Clone, Debug)]
pub struct TemplateContext<'a> {
    /// The active scene name.
    pub scene: &'a str,

    /// The captured camera's name.
    pub camera: &'a str,

    /// The sample count that was requested.
    pub samples: SampleCount,

    /// When the capture was taken.
    pub timestamp: DateTime<Local>,
}

impl TemplateContext<'_> {
    /// The replacement text for a placeholder.
    pub fn value(&self, placeholder: Placeholder) -> String {
        match placeholder {
            Placeholder::Scene => self.scene.to_string(),
            Placeholder::Camera => self.camera.to_string(),
            Placeholder::Samples => format!("MSAA{}", self.samples.count()),
            Placeholder::Date => self.timestamp.format("%Y-%m-%d").to_string(),
            Placeholder::Time => {
                // Leap seconds report nanoseconds past one second.
                let tenths = (self.timestamp.nanosecond() / 100_000_000).min(9);

                format!(
                    "{}-{:02}-{:02}.{}",
                    self.timestamp.hour(),
                    self.timestamp.minute(),
                    self.timestamp.second(),
                    tenths
                )
            }
        }
    }
}

/// Resolves a file name template, without the extension.
///
/// Every occurrence of a placeholder is replaced in a single left to right pass. Substituted
/// text is not scanned again, and unrecognised `{...}` sequences are kept as written.
pub fn resolve_file_name(template: &str, context: &TemplateContext<'_>) -> String {
    let mut resolved = String::with_capacity(template.len());
    let mut remaining = template;

    while let Some(start) = remaining.find('{') {
        resolved.push_str(&remaining[..start]);
        let candidate = &remaining[start..];

        match Placeholder::ALL
            .into_iter()
            .find(|placeholder| candidate.starts_with(placeholder.token()))
        {
            Some(placeholder) => {
                resolved.push_str(&context.value(placeholder));
                remaining = &candidate[placeholder.token().len()..];
            }

            None => {
                resolved.push('{');
                remaining = &candidate[1..];
            }
        }
    }

    resolved.push_str(remaining);
    resolved
}
