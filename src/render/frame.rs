use crate::error::ChartResult;
use crate::render::{PatternFill, TextPrimitive};

/// Extra drawing layered over the datasets once the chart has settled.
#[derive(Debug, Clone, PartialEq)]
pub struct PostDrawFrame<P> {
    pub pattern_fill: Option<PatternFill<P>>,
    pub texts: Vec<TextPrimitive>,
}

impl<P> Default for PostDrawFrame<P> {
    fn default() -> Self {
        Self {
            pattern_fill: None,
            texts: Vec::new(),
        }
    }
}

impl<P> PostDrawFrame<P> {
    #[must_use]
    pub fn with_pattern_fill(mut self, fill: PatternFill<P>) -> Self {
        self.pattern_fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if let Some(fill) = &self.pattern_fill {
            fill.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pattern_fill.is_none() && self.texts.is_empty()
    }
}
