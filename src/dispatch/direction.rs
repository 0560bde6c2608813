/// The two canonical directions of analysis, plus the
/// pair of them taken together.
///
/// Only `Past` and `Future` pick an EMD implementation.
/// `Bidirectional` is a valid direction elsewhere in the
/// pipeline, but asking for a distance along it is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// causes. repertoires need not factor, so EMD is solved in full.
    Past,
    /// effects. repertoires factor over nodes, so EMD has a closed form.
    Future,
    Bidirectional,
}

impl Direction {
    pub const fn all() -> &'static [Self] {
        &[Self::Past, Self::Future, Self::Bidirectional]
    }
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Future => "future",
            Self::Bidirectional => "bidirectional",
        }
    }
}

impl TryFrom<&str> for Direction {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "past" | "cause" => Ok(Self::Past),
            "future" | "effect" => Ok(Self::Future),
            "bidirectional" => Ok(Self::Bidirectional),
            other => Err(anyhow::anyhow!("unknown direction `{}`", other)),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
