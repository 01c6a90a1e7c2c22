//! Splitting a preprocessed line at `&&`, `||` and `|`.
//!
//! Operators are only recognised as standalone words. `|` does not build a
//! pipeline: it ends the line, and everything after it is dropped.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOperator {
    And,
    Or,
    Pipe,
}

impl PipelineOperator {
    fn from_word(word: &str) -> Option<Self> {
        match word {
            "&&" => Some(Self::And),
            "||" => Some(Self::Or),
            "|" => Some(Self::Pipe),
            _ => None,
        }
    }
}

/// When a stage runs, judged on the status of the last stage that did run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCondition {
    Always,
    OnSuccess,
    OnFailure,
}

impl RunCondition {
    pub fn should_run(self, last_status: i32) -> bool {
        match self {
            RunCondition::Always => true,
            RunCondition::OnSuccess => last_status == 0,
            RunCondition::OnFailure => last_status != 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineStage<'a> {
    pub words: Vec<&'a str>,
    pub condition: RunCondition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline<'a> {
    stages: Vec<PipelineStage<'a>>,
    truncated: Option<&'a str>,
}

impl<'a> Pipeline<'a> {
    pub fn parse(line: &'a str) -> Self {
        let mut stages = Vec::new();
        let mut words = Vec::new();
        let mut condition = RunCondition::Always;
        let mut truncated = None;

        let mut rest = line;
        while let Some((word, tail)) = next_word(rest) {
            rest = tail;
            match PipelineOperator::from_word(word) {
                None => words.push(word),
                Some(op) => {
                    stages.push(PipelineStage {
                        words: std::mem::take(&mut words),
                        condition,
                    });
                    condition = match op {
                        PipelineOperator::And => RunCondition::OnSuccess,
                        PipelineOperator::Or => RunCondition::OnFailure,
                        PipelineOperator::Pipe => {
                            truncated = Some(rest.trim());
                            break;
                        }
                    };
                }
            }
        }

        if truncated.is_none() {
            stages.push(PipelineStage { words, condition });
        }
        stages.retain(|stage| !stage.words.is_empty());

        Self { stages, truncated }
    }

    pub fn stages(&self) -> &[PipelineStage<'a>] {
        &self.stages
    }

    /// Text dropped after a `|`, if the line had one.
    pub fn truncated(&self) -> Option<&'a str> {
        self.truncated
    }
}

fn next_word(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if text.is_empty() {
        return None;
    }
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    Some(text.split_at(end))
}
