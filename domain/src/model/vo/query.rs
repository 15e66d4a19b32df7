use std::fmt;

/// One invocation of an administrative query tool.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    pub program: &'static str,
    pub args: Vec<String>,
}

impl Query {
    pub fn new<I, S>(program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
