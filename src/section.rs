//! The fixed, ordered inventory of wizard sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Inventor,
    Patent,
    Documentation,
    Commercial,
    Ownership,
    Valuation,
    Nft,
    Submit,
}

impl SectionId {
    pub fn label(self) -> &'static str {
        match self {
            SectionId::Inventor => "inventor",
            SectionId::Patent => "patent",
            SectionId::Documentation => "documentation",
            SectionId::Commercial => "commercial",
            SectionId::Ownership => "ownership",
            SectionId::Valuation => "valuation",
            SectionId::Nft => "nft",
            SectionId::Submit => "submit",
        }
    }

    /// Position of this section in the wizard.
    pub fn index(self) -> usize {
        SECTIONS
            .iter()
            .position(|s| s.id == self)
            .unwrap_or(SECTIONS.len() - 1)
    }

    pub fn descriptor(self) -> &'static SectionDescriptor {
        &SECTIONS[self.index()]
    }

    pub fn all() -> impl Iterator<Item = SectionId> {
        SECTIONS.iter().map(|s| s.id)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section '{0}'")]
pub struct UnknownSection(pub String);

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        SectionId::all()
            .find(|id| id.label() == key)
            .ok_or(UnknownSection(key))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDescriptor {
    pub id: SectionId,
    pub title: &'static str,
    pub description: &'static str,
}

pub const SECTIONS: [SectionDescriptor; 8] = [
    SectionDescriptor {
        id: SectionId::Inventor,
        title: "Inventor Details",
        description: "Share who is behind this patent. You can update these details later before submission.",
    },
    SectionDescriptor {
        id: SectionId::Patent,
        title: "Patent Details",
        description: "Provide the core information about your patent registration and classification.",
    },
    SectionDescriptor {
        id: SectionId::Documentation,
        title: "Documentation",
        description: "Upload required documents including specifications and technical drawings.",
    },
    SectionDescriptor {
        id: SectionId::Commercial,
        title: "Commercial Value & Market Information",
        description: "Describe the commercial potential and market positioning of your patent.",
    },
    SectionDescriptor {
        id: SectionId::Ownership,
        title: "Ownership Verification",
        description: "Verify your ownership rights and list any co-owners of the patent.",
    },
    SectionDescriptor {
        id: SectionId::Valuation,
        title: "Requested IP Valuation",
        description: "Propose your valuation with supporting justification and methodology.",
    },
    SectionDescriptor {
        id: SectionId::Nft,
        title: "IP-NFT Minting Parameters",
        description: "Configure how your patent will be tokenized as an IP-NFT.",
    },
    SectionDescriptor {
        id: SectionId::Submit,
        title: "Sign & Submit",
        description: "Review and sign your application to complete the submission.",
    },
];

pub const SECTION_COUNT: usize = SECTIONS.len();
