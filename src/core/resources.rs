//! Static reference material for the Forms and Livestreams panels.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegalForm {
    pub title: &'static str,
    pub description: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Livestream {
    pub court: &'static str,
    pub url: &'static str,
}

pub const LEGAL_FORMS: &[LegalForm] = &[
    LegalForm {
        title: "RTI Application",
        description: "Request information from a central public authority",
        url: "https://rtionline.gov.in/",
    },
    LegalForm {
        title: "Consumer Complaint",
        description: "File a complaint before a consumer commission (e-Daakhil)",
        url: "https://edaakhil.nic.in/",
    },
    LegalForm {
        title: "Cyber Crime Report",
        description: "Report online fraud, harassment or other cyber crime",
        url: "https://cybercrime.gov.in/",
    },
    LegalForm {
        title: "Legal Aid Application",
        description: "Apply for free legal services through NALSA",
        url: "https://nalsa.gov.in/lsams/",
    },
    LegalForm {
        title: "e-Filing (District & High Courts)",
        description: "File cases electronically through the eCourts portal",
        url: "https://filing.ecourts.gov.in/",
    },
];

pub const LIVESTREAMS: &[Livestream] = &[
    Livestream {
        court: "Supreme Court of India",
        url: "https://webcast.gov.in/scindia/",
    },
    Livestream {
        court: "Gujarat High Court",
        url: "https://www.youtube.com/@gujarathighcourt",
    },
    Livestream {
        court: "Karnataka High Court",
        url: "https://www.youtube.com/@highcourtofkarnataka",
    },
    Livestream {
        court: "Orissa High Court",
        url: "https://www.youtube.com/@orissahighcourt",
    },
];
