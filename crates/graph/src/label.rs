use crate::error::GraphError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

macro_rules! dependency_labels {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Dependency relation between a token and its head, as tagged by the parser.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum DependencyLabel {
            $($variant),+
        }

        impl DependencyLabel {
            pub const ALL: &'static [DependencyLabel] = &[$(DependencyLabel::$variant),+];

            /// Canonical upper-case tag, e.g. `"AMOD"`.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(DependencyLabel::$variant => $name),+
                }
            }
        }

        impl FromStr for DependencyLabel {
            type Err = GraphError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(DependencyLabel::$variant),)+
                    other => Err(GraphError::UnknownLabel(other.to_string())),
                }
            }
        }
    };
}

dependency_labels! {
    Unknown => "UNKNOWN",
    Abbrev => "ABBREV",
    Acomp => "ACOMP",
    Advcl => "ADVCL",
    Advmod => "ADVMOD",
    Amod => "AMOD",
    Appos => "APPOS",
    Attr => "ATTR",
    Aux => "AUX",
    Auxpass => "AUXPASS",
    Cc => "CC",
    Ccomp => "CCOMP",
    Conj => "CONJ",
    Csubj => "CSUBJ",
    Csubjpass => "CSUBJPASS",
    Dep => "DEP",
    Det => "DET",
    Discourse => "DISCOURSE",
    Dobj => "DOBJ",
    Expl => "EXPL",
    Goeswith => "GOESWITH",
    Iobj => "IOBJ",
    Mark => "MARK",
    Mwe => "MWE",
    Mwv => "MWV",
    Neg => "NEG",
    Nn => "NN",
    Npadvmod => "NPADVMOD",
    Nsubj => "NSUBJ",
    Nsubjpass => "NSUBJPASS",
    Num => "NUM",
    Number => "NUMBER",
    P => "P",
    Parataxis => "PARATAXIS",
    Partmod => "PARTMOD",
    Pcomp => "PCOMP",
    Pobj => "POBJ",
    Poss => "POSS",
    Postneg => "POSTNEG",
    Precomp => "PRECOMP",
    Preconj => "PRECONJ",
    Predet => "PREDET",
    Pref => "PREF",
    Prep => "PREP",
    Pronl => "PRONL",
    Prt => "PRT",
    Ps => "PS",
    Quantmod => "QUANTMOD",
    Rcmod => "RCMOD",
    Rcmodrel => "RCMODREL",
    Rdrop => "RDROP",
    Ref => "REF",
    Remnant => "REMNANT",
    Reparandum => "REPARANDUM",
    Root => "ROOT",
    Snum => "SNUM",
    Suff => "SUFF",
    Tmod => "TMOD",
    Topic => "TOPIC",
    Vmod => "VMOD",
    Vocative => "VOCATIVE",
    Xcomp => "XCOMP",
    Suffix => "SUFFIX",
    Title => "TITLE",
    Advphmod => "ADVPHMOD",
    Auxcaus => "AUXCAUS",
    Auxvv => "AUXVV",
    Dtmod => "DTMOD",
    Foreign => "FOREIGN",
    Kw => "KW",
    List => "LIST",
    Nomc => "NOMC",
    Nomcsubj => "NOMCSUBJ",
    Nomcsubjpass => "NOMCSUBJPASS",
    Numc => "NUMC",
    Cop => "COP",
    Dislocated => "DISLOCATED",
    Asp => "ASP",
    Gmod => "GMOD",
    Gobj => "GOBJ",
    Infmod => "INFMOD",
    Mes => "MES",
    Ncomp => "NCOMP",
}

impl DependencyLabel {
    /// Modifier relations whose tokens describe the word they hang off.
    pub const DESCRIPTIVE: [DependencyLabel; 5] = [
        DependencyLabel::Acomp,
        DependencyLabel::Amod,
        DependencyLabel::Advmod,
        DependencyLabel::Advcl,
        DependencyLabel::Pobj,
    ];

    #[must_use]
    pub fn is_descriptive(self) -> bool {
        Self::DESCRIPTIVE.contains(&self)
    }
}

impl fmt::Display for DependencyLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DependencyLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Parsers add tags over time; an unrecognized one must not fail the whole document.
impl<'de> Deserialize<'de> for DependencyLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(raw.parse().unwrap_or_else(|_| {
            log::debug!("Unrecognized dependency label {raw:?}, treating as UNKNOWN");
            DependencyLabel::Unknown
        }))
    }
}
