//! Icon tag mapping.
//!
//! Content data names icons with loose strings (`"ShieldCheck"`,
//! `"LinkedinIcon"`). [`IconName::from_tag`] turns those into a closed enum:
//! exact Lucide names first, then the legacy `*Icon` aliases, then the
//! [`IconName::Unknown`] sentinel, which renders as a help glyph.

#[cfg(test)]
#[path = "icon_test.rs"]
mod icon_test;

/// Every icon the site renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconName {
    Award,
    ArrowDown,
    ArrowDown01,
    ArrowRight,
    Battery,
    ChevronRight,
    Droplet,
    Facebook,
    Flag,
    Heart,
    HeartHandshake,
    HelpCircle,
    Instagram,
    Leaf,
    Lightbulb,
    Linkedin,
    Map,
    MessageSquare,
    Moon,
    Package,
    Recycle,
    Shield,
    ShieldCheck,
    Smartphone,
    Star,
    Sun,
    TreePine,
    TrendingUp,
    Truck,
    Twitter,
    Users,
    X,
    Zap,
    /// Tag not recognised.
    Unknown,
}

impl IconName {
    pub const ALL: [Self; 34] = [
        Self::Award,
        Self::ArrowDown,
        Self::ArrowDown01,
        Self::ArrowRight,
        Self::Battery,
        Self::ChevronRight,
        Self::Droplet,
        Self::Facebook,
        Self::Flag,
        Self::Heart,
        Self::HeartHandshake,
        Self::HelpCircle,
        Self::Instagram,
        Self::Leaf,
        Self::Lightbulb,
        Self::Linkedin,
        Self::Map,
        Self::MessageSquare,
        Self::Moon,
        Self::Package,
        Self::Recycle,
        Self::Shield,
        Self::ShieldCheck,
        Self::Smartphone,
        Self::Star,
        Self::Sun,
        Self::TreePine,
        Self::TrendingUp,
        Self::Truck,
        Self::Twitter,
        Self::Users,
        Self::X,
        Self::Zap,
        Self::Unknown,
    ];

    /// Total mapping from a content tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        if let Some(icon) = Self::ALL.into_iter().find(|icon| *icon != Self::Unknown && icon.tag() == tag) {
            return icon;
        }
        match tag {
            "LinkedinIcon" => Self::Linkedin,
            "TwitterIcon" => Self::Twitter,
            _ => {
                tracing::warn!(tag, "unknown icon tag");
                Self::Unknown
            }
        }
    }

    /// Canonical PascalCase tag, as written in content data.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Award => "Award",
            Self::ArrowDown => "ArrowDown",
            Self::ArrowDown01 => "ArrowDown01",
            Self::ArrowRight => "ArrowRight",
            Self::Battery => "Battery",
            Self::ChevronRight => "ChevronRight",
            Self::Droplet => "Droplet",
            Self::Facebook => "Facebook",
            Self::Flag => "Flag",
            Self::Heart => "Heart",
            Self::HeartHandshake => "HeartHandshake",
            Self::HelpCircle => "HelpCircle",
            Self::Instagram => "Instagram",
            Self::Leaf => "Leaf",
            Self::Lightbulb => "Lightbulb",
            Self::Linkedin => "Linkedin",
            Self::Map => "Map",
            Self::MessageSquare => "MessageSquare",
            Self::Moon => "Moon",
            Self::Package => "Package",
            Self::Recycle => "Recycle",
            Self::Shield => "Shield",
            Self::ShieldCheck => "ShieldCheck",
            Self::Smartphone => "Smartphone",
            Self::Star => "Star",
            Self::Sun => "Sun",
            Self::TreePine => "TreePine",
            Self::TrendingUp => "TrendingUp",
            Self::Truck => "Truck",
            Self::Twitter => "Twitter",
            Self::Users => "Users",
            Self::X => "X",
            Self::Zap => "Zap",
            Self::Unknown => "Unknown",
        }
    }

    /// Kebab-case Lucide sprite name. `Unknown` draws the help glyph.
    #[must_use]
    pub fn lucide_name(self) -> &'static str {
        match self {
            Self::Award => "award",
            Self::ArrowDown => "arrow-down",
            Self::ArrowDown01 => "arrow-down-0-1",
            Self::ArrowRight => "arrow-right",
            Self::Battery => "battery",
            Self::ChevronRight => "chevron-right",
            Self::Droplet => "droplet",
            Self::Facebook => "facebook",
            Self::Flag => "flag",
            Self::Heart => "heart",
            Self::HeartHandshake => "heart-handshake",
            Self::HelpCircle | Self::Unknown => "circle-help",
            Self::Instagram => "instagram",
            Self::Leaf => "leaf",
            Self::Lightbulb => "lightbulb",
            Self::Linkedin => "linkedin",
            Self::Map => "map",
            Self::MessageSquare => "message-square",
            Self::Moon => "moon",
            Self::Package => "package",
            Self::Recycle => "recycle",
            Self::Shield => "shield",
            Self::ShieldCheck => "shield-check",
            Self::Smartphone => "smartphone",
            Self::Star => "star",
            Self::Sun => "sun",
            Self::TreePine => "tree-pine",
            Self::TrendingUp => "trending-up",
            Self::Truck => "truck",
            Self::Twitter => "twitter",
            Self::Users => "users",
            Self::X => "x",
            Self::Zap => "zap",
        }
    }
}

/// Rendered icon size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSize {
    Xs,
    Sm,
    #[default]
    Md,
    Lg,
    Xl,
    Xxl,
}

impl IconSize {
    #[must_use]
    pub fn px(self) -> u32 {
        match self {
            Self::Xs => 14,
            Self::Sm => 16,
            Self::Md => 20,
            Self::Lg => 24,
            Self::Xl => 32,
            Self::Xxl => 48,
        }
    }

    /// `xs`..`2xl`; anything else is the default `md`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "xs" => Self::Xs,
            "sm" => Self::Sm,
            "lg" => Self::Lg,
            "xl" => Self::Xl,
            "2xl" => Self::Xxl,
            _ => Self::Md,
        }
    }
}

/// Rendered stroke width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeWidth {
    Thin,
    #[default]
    Regular,
    Medium,
    Bold,
}

impl StrokeWidth {
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Thin => 1.0,
            Self::Regular => 1.5,
            Self::Medium => 2.0,
            Self::Bold => 2.5,
        }
    }

    /// `thin`, `regular`, `medium`, `bold`; anything else is `regular`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw {
            "thin" => Self::Thin,
            "medium" => Self::Medium,
            "bold" => Self::Bold,
            _ => Self::Regular,
        }
    }
}
