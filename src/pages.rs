use crate::error::Result;
use askama::Template;
use chrono::{Datelike, Utc};

/// Static page shells. Each renders a template extending `layout.html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Chat,
    ImageGenerator,
    InstagramDownloader,
    TempMail,
    AnimeWallpapers,
    IpLookup,
    SmsSender,
    DevTools,
    UniqueTools,
    SubtitleTools,
    YoutubeDownloader,
    Weather,
}

impl Page {
    pub const ALL: [Page; 13] = [
        Page::Home,
        Page::Chat,
        Page::ImageGenerator,
        Page::InstagramDownloader,
        Page::TempMail,
        Page::AnimeWallpapers,
        Page::IpLookup,
        Page::SmsSender,
        Page::DevTools,
        Page::UniqueTools,
        Page::SubtitleTools,
        Page::YoutubeDownloader,
        Page::Weather,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Chat => "/chat",
            Self::ImageGenerator => "/image-generator",
            Self::InstagramDownloader => "/instagram-downloader",
            Self::TempMail => "/temp-mail",
            Self::AnimeWallpapers => "/anime-wallpapers",
            Self::IpLookup => "/ip-lookup",
            Self::SmsSender => "/sms-sender",
            Self::DevTools => "/dev-tools",
            Self::UniqueTools => "/unique-tools",
            Self::SubtitleTools => "/subtitle-tools",
            Self::YoutubeDownloader => "/youtube-downloader",
            Self::Weather => "/weather",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "All Tools",
            Self::Chat => "AI Chat",
            Self::ImageGenerator => "Image Generator",
            Self::InstagramDownloader => "Instagram Downloader",
            Self::TempMail => "Temp Mail",
            Self::AnimeWallpapers => "Anime Wallpapers",
            Self::IpLookup => "IP Lookup",
            Self::SmsSender => "SMS Sender",
            Self::DevTools => "Developer Tools",
            Self::UniqueTools => "Unique Tools",
            Self::SubtitleTools => "Subtitle Tools",
            Self::YoutubeDownloader => "YouTube Downloader",
            Self::Weather => "Weather",
        }
    }

    pub fn render(&self) -> Result<String> {
        let layout = Layout::new(*self);
        let html = match self {
            Self::Home => IndexPage { layout }.render()?,
            Self::Chat => ChatPage { layout }.render()?,
            Self::ImageGenerator => ImageGeneratorPage { layout }.render()?,
            Self::InstagramDownloader => InstagramPage { layout }.render()?,
            Self::TempMail => TempMailPage { layout }.render()?,
            Self::AnimeWallpapers => AnimePage { layout }.render()?,
            Self::IpLookup => IpLookupPage { layout }.render()?,
            Self::SmsSender => SmsSenderPage { layout }.render()?,
            Self::DevTools => DevToolsPage { layout }.render()?,
            Self::UniqueTools => UniqueToolsPage { layout }.render()?,
            Self::SubtitleTools => SubtitleToolsPage { layout }.render()?,
            Self::YoutubeDownloader => YoutubePage { layout }.render()?,
            Self::Weather => WeatherPage { layout }.render()?,
        };
        Ok(html)
    }
}

#[allow(dead_code)] // fields used by Askama templates
struct NavLink {
    href: &'static str,
    title: &'static str,
    active: bool,
}

#[allow(dead_code)] // fields used by Askama templates
struct Layout {
    title: &'static str,
    nav: Vec<NavLink>,
    year: i32,
}

impl Layout {
    fn new(current: Page) -> Self {
        Self {
            title: current.title(),
            nav: Page::ALL
                .iter()
                .map(|p| NavLink {
                    href: p.path(),
                    title: p.title(),
                    active: *p == current,
                })
                .collect(),
            year: Utc::now().year(),
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "chat.html")]
struct ChatPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "image_generator.html")]
struct ImageGeneratorPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "instagram.html")]
struct InstagramPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "temp_mail.html")]
struct TempMailPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "anime.html")]
struct AnimePage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "ip_lookup.html")]
struct IpLookupPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "sms_sender.html")]
struct SmsSenderPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "dev_tools.html")]
struct DevToolsPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "unique_tools.html")]
struct UniqueToolsPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "subtitle_tools.html")]
struct SubtitleToolsPage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "youtube.html")]
struct YoutubePage {
    layout: Layout,
}

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherPage {
    layout: Layout,
}
