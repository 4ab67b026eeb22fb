// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rss::extension::itunes::{
    ITunesCategoryBuilder, ITunesChannelExtensionBuilder, ITunesOwnerBuilder,
};
use rss::extension::{ExtensionBuilder, ExtensionMap};
use rss::{Channel, ChannelBuilder, ImageBuilder};

use crate::config::PodcastConfig;

use super::item::Episode;

const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
const ITUNESU_NAMESPACE: &str = "http://www.itunesu.com/feed";

/// Name of the generated feed document inside the media folder
pub const FEED_FILENAME: &str = "feed.xml";

/// Assemble the complete channel document.
///
/// `image` is the cover image filename inside the media folder, if one was
/// found; when absent the image block is omitted entirely. `now` becomes the
/// channel publish and last-build date and anchors the synthesized episode
/// dates.
pub fn build_channel(
    config: &PodcastConfig,
    image: Option<&str>,
    episodes: &[Episode],
    now: DateTime<Utc>,
) -> Channel {
    let base_url = config.base_url();
    let website_url = format!("{base_url}/index.html");
    let feed_url = format!("{base_url}/{FEED_FILENAME}");
    let image_url = image.map(|name| format!("{base_url}/{name}"));
    let pub_date = now.to_rfc2822();

    let owner = config.owner_email.as_ref().map(|email| {
        ITunesOwnerBuilder::default()
            .name(config.owner_name.clone())
            .email(email.clone())
            .build()
    });

    let categories = config
        .category
        .as_ref()
        .map(|text| vec![ITunesCategoryBuilder::default().text(text.clone()).build()])
        .unwrap_or_default();

    let explicit = if config.explicit { "yes" } else { "no" };

    let itunes = ITunesChannelExtensionBuilder::default()
        .author(config.author.clone())
        .summary(config.podcast_description.clone())
        .subtitle(config.podcast_description.clone())
        .image(image_url.clone())
        .owner(owner)
        .categories(categories)
        .keywords(config.keywords.clone())
        .explicit(explicit.to_string())
        .build();

    let mut builder = ChannelBuilder::default();
    builder
        .title(config.podcast_title.clone())
        .link(website_url.clone())
        .description(config.podcast_description.clone())
        .language(config.language.clone())
        .copyright(config.copyright.clone())
        .managing_editor(config.owner_email.clone())
        .webmaster(config.owner_email.clone())
        .generator("podgen".to_string())
        .pub_date(pub_date.clone())
        .last_build_date(pub_date)
        .itunes_ext(itunes)
        .extensions(atom_self_link(&feed_url))
        .namespaces(BTreeMap::from([
            ("atom".to_string(), ATOM_NAMESPACE.to_string()),
            ("itunesu".to_string(), ITUNESU_NAMESPACE.to_string()),
        ]))
        .items(
            episodes
                .iter()
                .map(Episode::to_rss_item)
                .collect::<Vec<_>>(),
        );

    if let Some(url) = image_url {
        builder.image(
            ImageBuilder::default()
                .url(url)
                .title(config.podcast_title.clone())
                .link(website_url)
                .build(),
        );
    }

    builder.build()
}

/// `<atom:link rel="self"/>` pointing back at the feed document
fn atom_self_link(feed_url: &str) -> ExtensionMap {
    let mut attrs = BTreeMap::new();
    attrs.insert("href".to_string(), feed_url.to_string());
    attrs.insert("rel".to_string(), "self".to_string());
    attrs.insert("type".to_string(), "application/rss+xml".to_string());

    let link = ExtensionBuilder::default()
        .name("atom:link")
        .attrs(attrs)
        .build();

    let mut map = ExtensionMap::default();
    map.entry("atom".to_string())
        .or_default()
        .insert("link".to_string(), vec![link]);
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rss::validation::Validate;

    fn make_config() -> PodcastConfig {
        PodcastConfig {
            podcast_http: "http://x".to_string(),
            media_folder: "/m".into(),
            podcast_description: "d".to_string(),
            podcast_title: "T".to_string(),
            author: "A".to_string(),
            strip_mp3_metadata: false,
            language: "en-us".to_string(),
            copyright: None,
            owner_name: None,
            owner_email: None,
            category: None,
            keywords: None,
            explicit: false,
        }
    }

    fn make_episode(title: &str) -> Episode {
        Episode {
            title: title.to_string(),
            description: "d".to_string(),
            duration_seconds: 10,
            url: format!("http://x/{title}.mp3"),
            pub_date: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn channel_links_derive_from_base_url() {
        let channel = build_channel(&make_config(), None, &[], now());

        assert_eq!(channel.link(), "http://x/index.html");

        let atom = channel.extensions().get("atom").unwrap();
        let link = &atom.get("link").unwrap()[0];
        assert_eq!(link.name(), "atom:link");
        assert_eq!(link.attrs().get("href").map(String::as_str), Some("http://x/feed.xml"));
        assert_eq!(link.attrs().get("rel").map(String::as_str), Some("self"));

        let xml = channel.to_string();
        assert!(xml.contains("http://www.w3.org/2005/Atom"));
    }

    #[test]
    fn channel_carries_configured_description() {
        let channel = build_channel(&make_config(), None, &[], now());

        assert_eq!(channel.description(), "d");
        assert_eq!(channel.title(), "T");
        let itunes = channel.itunes_ext().unwrap();
        assert_eq!(itunes.author(), Some("A"));
        assert_eq!(itunes.summary(), Some("d"));
        assert_eq!(itunes.explicit(), Some("no"));
    }

    #[test]
    fn image_is_omitted_when_absent() {
        let channel = build_channel(&make_config(), None, &[], now());

        assert!(channel.image().is_none());
        assert!(channel.itunes_ext().unwrap().image().is_none());
        assert!(!channel.to_string().contains("<image>"));
    }

    #[test]
    fn image_url_joins_base_and_filename() {
        let channel = build_channel(&make_config(), Some("cover.png"), &[], now());

        let image = channel.image().unwrap();
        assert_eq!(image.url(), "http://x/cover.png");
        assert_eq!(image.link(), "http://x/index.html");
        assert_eq!(
            channel.itunes_ext().unwrap().image(),
            Some("http://x/cover.png")
        );
    }

    #[test]
    fn empty_folder_produces_well_formed_channel_without_items() {
        let channel = build_channel(&make_config(), None, &[], now());
        let xml = channel.to_string();

        assert!(channel.validate().is_ok());
        assert!(channel.items().is_empty());
        assert!(!xml.contains("<item>"));
        assert!(xml.contains("<channel>"));
    }

    #[test]
    fn items_appear_in_given_order() {
        let episodes = vec![make_episode("a"), make_episode("b")];
        let channel = build_channel(&make_config(), None, &episodes, now());

        assert_eq!(channel.items().len(), 2);
        assert_eq!(channel.items()[0].title(), Some("a"));
        assert_eq!(channel.items()[1].title(), Some("b"));
    }

    #[test]
    fn itunesu_namespace_is_declared() {
        let channel = build_channel(&make_config(), None, &[make_episode("a")], now());
        let xml = channel.to_string();

        assert!(xml.contains("http://www.itunesu.com/feed"));
        assert!(xml.contains("itunesu:code=\"112\""));
    }

    #[test]
    fn optional_owner_and_category_are_emitted_when_configured() {
        let mut config = make_config();
        config.owner_email = Some("podcast@example.com".to_string());
        config.owner_name = Some("Operator".to_string());
        config.category = Some("Arts".to_string());

        let channel = build_channel(&config, None, &[], now());
        let itunes = channel.itunes_ext().unwrap();

        let owner = itunes.owner().unwrap();
        assert_eq!(owner.email(), Some("podcast@example.com"));
        assert_eq!(owner.name(), Some("Operator"));
        assert_eq!(itunes.categories()[0].text(), "Arts");
        assert_eq!(channel.managing_editor(), Some("podcast@example.com"));
    }

    #[test]
    fn titles_are_escaped_by_the_builder() {
        let mut episode = make_episode("a");
        episode.title = "Tom & Jerry <live>".to_string();
        let channel = build_channel(&make_config(), None, &[episode], now());
        let xml = channel.to_string();

        assert!(xml.contains("Tom &amp; Jerry &lt;live&gt;"));
        assert!(!xml.contains("<live>"));
    }
}
