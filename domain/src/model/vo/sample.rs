/// One labeled gauge value handed to the exposition layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: &'static str,
    pub help: &'static str,
    pub labels: Vec<(&'static str, String)>,
    pub value: f64,
}

impl Sample {
    #[inline]
    pub fn new(name: &'static str, help: &'static str, value: f64) -> Self {
        Self {
            name,
            help,
            labels: Vec::new(),
            value,
        }
    }

    #[inline]
    pub fn label(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.labels.push((key, value.into()));
        self
    }

    pub fn label_value(&self, key: &str) -> Option<&str> {
        self.labels.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }
}

/// Flattens a parsed record into gauge samples.
pub trait IntoSamples {
    fn into_samples(self) -> Vec<Sample>;
}

/// Pushes `sample` only when its value is positive.
pub(crate) fn push_positive(samples: &mut Vec<Sample>, sample: Sample) {
    if sample.value > 0.0 {
        samples.push(sample);
    }
}
