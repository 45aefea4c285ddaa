//! Read-only lookup tables for icon and company references.
//!
//! The built-in tables are process-wide and immutable. A [`Catalog`] starts
//! from them and can be extended by the caller (usually from `resumark.yml`)
//! without touching the core.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const STROKE_ATTRS: &str = r#"fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round""#;
const FILL_ATTRS: &str = r#"fill="currentColor""#;

const USER: &str = r#"<path d="M19 21v-2a4 4 0 0 0-4-4H9a4 4 0 0 0-4 4v2"/><circle cx="12" cy="7" r="4"/>"#;
const PHONE: &str = r#"<path d="M22 16.92v3a2 2 0 0 1-2.18 2 19.79 19.79 0 0 1-8.63-3.07 19.5 19.5 0 0 1-6-6 19.79 19.79 0 0 1-3.07-8.67A2 2 0 0 1 4.11 2h3a2 2 0 0 1 2 1.72c.127.96.361 1.903.7 2.81a2 2 0 0 1-.45 2.11L8.09 9.91a16 16 0 0 0 6 6l1.27-1.27a2 2 0 0 1 2.11-.45c.907.339 1.85.573 2.81.7A2 2 0 0 1 22 16.92z"/>"#;
const MAIL: &str = r#"<rect width="20" height="16" x="2" y="4" rx="2"/><path d="m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"/>"#;
const PIN: &str = r#"<path d="M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z"/><circle cx="12" cy="10" r="3"/>"#;
const LINK: &str = r#"<path d="M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71"/><path d="M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71"/>"#;
const GITHUB: &str = r#"<path d="M12 0C5.37 0 0 5.37 0 12c0 5.31 3.435 9.795 8.205 11.385.6.105.825-.255.825-.57 0-.285-.015-1.23-.015-2.235-3.015.555-3.795-.735-4.035-1.41-.135-.345-.72-1.41-1.23-1.695-.42-.225-1.02-.78-.015-.795.945-.015 1.62.87 1.845 1.23 1.08 1.815 2.805 1.305 3.495.99.105-.78.42-1.305.765-1.605-2.67-.3-5.46-1.335-5.46-5.925 0-1.305.465-2.385 1.23-3.225-.12-.3-.54-1.53.12-3.18 0 0 1.005-.315 3.3 1.23.96-.27 1.98-.405 3-.405s2.04.135 3 .405c2.295-1.56 3.3-1.23 3.3-1.23.66 1.65.24 2.88.12 3.18.765.84 1.23 1.905 1.23 3.225 0 4.605-2.805 5.625-5.475 5.925.435.375.81 1.095.81 2.22 0 1.605-.015 2.895-.015 3.3 0 .315.225.69.825.57A12.02 12.02 0 0 0 24 12c0-6.63-5.37-12-12-12z"/>"#;
const CALENDAR: &str = r#"<rect width="18" height="18" x="3" y="4" rx="2" ry="2"/><line x1="16" x2="16" y1="2" y2="6"/><line x1="8" x2="8" y1="2" y2="6"/><line x1="3" x2="21" y1="10" y2="10"/>"#;
const MALE: &str = r#"<circle cx="10" cy="14" r="5"/><path d="M19 5l-5.4 5.4"/><path d="M15 5h4v4"/>"#;
const FEMALE: &str = r#"<circle cx="12" cy="8" r="5"/><path d="M12 13v8"/><path d="M9 18h6"/>"#;
const STAR: &str = r#"<polygon points="12 2 15.09 8.26 22 9.27 17 14.14 18.18 21.02 12 17.77 5.82 21.02 7 14.14 2 9.27 8.91 8.26 12 2"/>"#;
const TROPHY: &str = r#"<path d="M6 9H4.5a2.5 2.5 0 0 1 0-5H6"/><path d="M18 9h1.5a2.5 2.5 0 0 0 0-5H18"/><path d="M4 22h16"/><path d="M10 14.66V17c0 .55-.47.98-.97 1.21C7.85 18.75 7 20.24 7 22"/><path d="M14 14.66V17c0 .55.47.98.97 1.21C16.15 18.75 17 20.24 17 22"/><path d="M18 2H6v7a6 6 0 0 0 12 0V2Z"/>"#;
const GRADUATION: &str = r#"<path d="M22 10v6M2 10l10-5 10 5-10 5z"/><path d="M6 12v5c0 2 2 3 6 3s6-1 6-3v-5"/>"#;
const BRIEFCASE: &str = r#"<rect width="20" height="14" x="2" y="7" rx="2" ry="2"/><path d="M16 21V5a2 2 0 0 0-2-2h-4a2 2 0 0 0-2 2v16"/>"#;

/// (names, body, filled)
const ICONS: &[(&[&str], &str, bool)] = &[
    (&["user", "person"], USER, false),
    (&["phone"], PHONE, false),
    (&["email", "mail"], MAIL, false),
    (&["location", "map"], PIN, false),
    (&["link"], LINK, false),
    (&["github"], GITHUB, true),
    (&["calendar"], CALENDAR, false),
    (&["male"], MALE, false),
    (&["female"], FEMALE, false),
    (&["star"], STAR, false),
    (&["trophy"], TROPHY, false),
    (&["graduation"], GRADUATION, false),
    (&["briefcase"], BRIEFCASE, false),
];

const COMPANIES: &[(&str, &str)] = &[
    ("小红书", "https://fe-video-qc.xhscdn.com/fe-platform/ed8fe781ce9e16b8eeac5b97bed1cb20b5e43538.ico"),
    ("美团", "https://s3plus.meituan.net/v1/mss_e2821d7f0cfe4ac1bf9202f011ce397b/official-website/common/logo.svg"),
    ("阿里", "https://img.alicdn.com/tfs/TB1Ly5oS3HqK1RjSZFPXXcwapXa-238-54.png"),
    ("阿里巴巴", "https://img.alicdn.com/tfs/TB1Ly5oS3HqK1RjSZFPXXcwapXa-238-54.png"),
    ("腾讯", "https://mat1.gtimg.com/pingjs/ext2020/qqindex2018/dist/img/qq_logo_2x.png"),
    ("字节跳动", "https://lf1-cdn-tos.bytescm.com/obj/static/ies/bytedance_official/_next/static/images/logo-icon-f74aa357b6ec5697c8ca7e27fbe3e62b.svg"),
    ("字节", "https://lf1-cdn-tos.bytescm.com/obj/static/ies/bytedance_official/_next/static/images/logo-icon-f74aa357b6ec5697c8ca7e27fbe3e62b.svg"),
    ("百度", "https://www.baidu.com/img/flexible/logo/pc/result.png"),
    ("京东", "https://www.jd.com/favicon.ico"),
    ("华为", "https://www.huawei.com/-/media/corporate/images/home/logo/huawei-logo.png"),
    ("快手", "https://static.yximgs.com/udata/pkg/fe/kuaishou-favicon.ico"),
    ("拼多多", "https://mobile.yangkeduo.com/favicon.ico"),
    ("B站", "https://www.bilibili.com/favicon.ico"),
    ("哔哩哔哩", "https://www.bilibili.com/favicon.ico"),
];

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    let mut catalog = Catalog::empty();
    for (names, body, filled) in ICONS {
        let svg = svg_icon(body, *filled);
        for name in *names {
            catalog.icons.insert((*name).to_string(), svg.clone());
        }
    }
    for (name, url) in COMPANIES {
        catalog.companies.insert((*name).to_string(), (*url).to_string());
    }
    catalog
});

fn svg_icon(body: &str, filled: bool) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="14" height="14" viewBox="0 0 24 24" {}>{}</svg>"#,
        if filled { FILL_ATTRS } else { STROKE_ATTRS },
        body
    )
}

/// Icon and company-logo tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    icons: HashMap<String, String>,
    companies: HashMap<String, String>,
}

impl Catalog {
    /// The built-in icon set and company table
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn empty() -> Self {
        Self {
            icons: HashMap::new(),
            companies: HashMap::new(),
        }
    }

    /// Add or replace an icon; names are matched case-insensitively
    pub fn with_icon(mut self, name: &str, svg: impl Into<String>) -> Self {
        self.icons.insert(name.trim().to_lowercase(), svg.into());
        self
    }

    /// Add or replace a company logo URL
    pub fn with_company(mut self, name: &str, url: impl Into<String>) -> Self {
        self.companies.insert(name.trim().to_string(), url.into());
        self
    }

    pub fn extend_icons<I, K, V>(&mut self, icons: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, svg) in icons {
            self.icons
                .insert(name.as_ref().trim().to_lowercase(), svg.into());
        }
    }

    pub fn extend_companies<I, K, V>(&mut self, companies: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, url) in companies {
            self.companies
                .insert(name.as_ref().trim().to_string(), url.into());
        }
    }

    /// SVG markup for an icon name (trimmed, case-insensitive)
    pub fn icon(&self, name: &str) -> Option<&str> {
        self.icons
            .get(&name.trim().to_lowercase())
            .map(String::as_str)
    }

    /// Logo URL for a company name (trimmed, exact)
    pub fn company_logo(&self, name: &str) -> Option<&str> {
        self.companies.get(name.trim()).map(String::as_str)
    }

    pub fn icon_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Catalog {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
