//! # Alerts
//! Dismissible alert banners shown at the top of the page's main region.
//! The page is reached through the `AlertSurface` trait, so the helpers here
//! work with any front-end that can prepend a banner.

/// The kind of banner, which decides how it is styled.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlertKind {
    Error,
    Success,
}

impl AlertKind {
    /// Return the CSS classes used to style a banner of this kind.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Error => "alert alert-danger alert-dismissible fade show",
            Self::Success => "alert alert-success alert-dismissible fade show",
        }
    }
}

/// A dismissible banner carrying a message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Banner {
    kind: AlertKind,
    message: String,
}

impl Banner {
    pub fn new<S>(kind: AlertKind, message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> AlertKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Render this banner as HTML, including the dismiss button. The
    /// message is escaped.
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"{}\" role=\"alert\">{}<button type=\"button\" class=\"btn-close\" data-bs-dismiss=\"alert\"></button></div>",
            self.kind.css_class(),
            escape_html(&self.message)
        )
    }
}

/// The part of the page which alert banners are inserted into.
pub trait AlertSurface {
    /// Insert `banner` before every banner already shown.
    fn prepend_banner(&mut self, banner: Banner);
}

/// Show an error banner with the given message.
pub fn show_error<S>(surface: &mut S, message: &str)
where
    S: AlertSurface + ?Sized,
{
    surface.prepend_banner(Banner::new(AlertKind::Error, message));
}

/// Show a success banner with the given message.
pub fn show_success<S>(surface: &mut S, message: &str)
where
    S: AlertSurface + ?Sized,
{
    surface.prepend_banner(Banner::new(AlertKind::Success, message));
}

/// An in-memory stand-in for the page's main region. Banners are kept
/// newest first.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HtmlRegion {
    banners: Vec<Banner>,
}

impl HtmlRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    /// Remove the banner at `index`, as the dismiss button would.
    pub fn dismiss(&mut self, index: usize) -> Option<Banner> {
        if index < self.banners.len() {
            Some(self.banners.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.banners.clear();
    }

    /// Render every banner, newest first.
    pub fn to_html(&self) -> String {
        self.banners.iter().map(Banner::to_html).collect()
    }
}

impl AlertSurface for HtmlRegion {
    fn prepend_banner(&mut self, banner: Banner) {
        self.banners.insert(0, banner);
    }
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
