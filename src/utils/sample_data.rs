//! Built-in sample content
//!
//! A fresh catalog is seeded with [`default_channels`] so the browsing API is
//! usable before any playlist has been imported. [`SAMPLE_PLAYLIST`] is a
//! small headerless M3U list of French news channels that admins can import
//! in one step to try the importer.

use crate::models::{ChannelCategory, ChannelDraft};

/// Headerless playlist used by the one-click sample import
pub const SAMPLE_PLAYLIST: &str = r#"#EXTINF:-1 tvg-logo="https://i.ibb.co/kckRLh5/bfm.png" group-title="1. |FR|🇫🇷 INFORMATION",BFM TV
https://ncdn-live-bfm.pfd.sfr.net/shls/LIVE$BFM_TV/index.m3u8?start=LIVE&end=END
#EXTINF:-1 tvg-logo="https://i.ibb.co/qY6w8ds/cnews.png",CNEWS
https://hls-m015-live-aka-canalplus.akamaized.net/live/disk/cnews-clair-hd/hls-v3-hd-clair/cnews-clair-hd.m3u8
#EXTINF:-1 tvg-logo="https://i.ibb.co/Zfcrrr1/lci.png",LCI
https://raw.githubusercontent.com/ipstreet312/freeiptv/master/ressources/btv/py/lci1.m3u8
#EXTINF:-1 tvg-logo="https://i.ibb.co/XkLHrbC/frinfo2bl.png",FRANCE INFO:
https://raw.githubusercontent.com/ipstreet312/freeiptv/master/ressources/ftv/py/frin.m3u8
#EXTINF:-1 tvg-logo="https://i.ibb.co/ZBqk6mK/lemedia.jpg",LE MÉDIA TV
https://raw.githubusercontent.com/BG47510/tube/refs/heads/main/lemedia.m3u8
#EXTINF:-1 tvg-logo="https://i.ibb.co/ZgqnqnJ/cgtnfr.png",CGTN FRANÇAIS
http://news.cgtn.com/resource/live/french/cgtn-f.m3u8
#EXTINF:-1 tvg-logo="https://i.ibb.co/nR2HsVr/ln24.png",LN24 BE
https://live-ln24.digiteka.com/1911668011/index.m3u8
"#;

const DEMO_STREAM: &str =
    "https://cdn.live.br1.jmvstream.com/w/LVW-10801/LVW10801_Xvg4R0u57n/chunklist.m3u8";

struct SampleChannel {
    name: &'static str,
    stream_url: &'static str,
    thumbnail_url: &'static str,
    category: ChannelCategory,
    description: &'static str,
}

const SAMPLE_CHANNELS: &[SampleChannel] = &[
    SampleChannel {
        name: "TV Brasil",
        stream_url: DEMO_STREAM,
        thumbnail_url: "https://logodownload.org/wp-content/uploads/2017/11/tv-brasil-logo.png",
        category: ChannelCategory::News,
        description: "Canal público nacional com programação educativa, cultural e jornalística.",
    },
    SampleChannel {
        name: "Amazon Sat",
        stream_url: "https://amazonsat.brasilstream.com.br/hls/amazonsat/index.m3u8",
        thumbnail_url: "https://upload.wikimedia.org/wikipedia/commons/thumb/2/28/Amazon_sat_logo.png/640px-Amazon_sat_logo.png",
        category: ChannelCategory::Entertainment,
        description: "Canal com foco em conteúdo da região amazônica e programação variada.",
    },
    SampleChannel {
        name: "Rede Minas",
        stream_url: "https://8hzcavccys.zoeweb.tv/redeminas/ngrp:redeminas_all/chunklist_b2179072.m3u8",
        thumbnail_url: "https://upload.wikimedia.org/wikipedia/commons/thumb/b/bc/Rede_Minas_logo.svg/500px-Rede_Minas_logo.svg.png",
        category: ChannelCategory::Entertainment,
        description: "Canal regional de Minas Gerais com programação cultural e educativa.",
    },
    SampleChannel {
        name: "ISTV",
        stream_url: "https://video08.logicahost.com.br/istvnacional/srt.stream/chunklist_w745016844.m3u8",
        thumbnail_url: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRvR1NdbW7iVqCKc5e5TFcZEJCIQxVcyWlmw30xsrNIB9E1GnfL8UiMPfnHzOGvXfpCq4Y&usqp=CAU",
        category: ChannelCategory::Entertainment,
        description: "Canal independente com programação variada de entretenimento.",
    },
    SampleChannel {
        name: "Sports Live",
        stream_url: DEMO_STREAM,
        thumbnail_url: "https://placehold.co/400x225/FFA07A/ffffff?text=Sports+Live",
        category: ChannelCategory::Sports,
        description: "Canal dedicado a transmissões esportivas ao vivo.",
    },
    SampleChannel {
        name: "Music Hits",
        stream_url: DEMO_STREAM,
        thumbnail_url: "https://placehold.co/400x225/6495ED/ffffff?text=Music+Hits",
        category: ChannelCategory::Music,
        description: "Os melhores clipes musicais e shows ao vivo.",
    },
    SampleChannel {
        name: "Documentários HD",
        stream_url: DEMO_STREAM,
        thumbnail_url: "https://placehold.co/400x225/90EE90/333333?text=Documentários",
        category: ChannelCategory::Documentary,
        description: "Os melhores documentários em alta definição.",
    },
    SampleChannel {
        name: "Cine Clássicos",
        stream_url: DEMO_STREAM,
        thumbnail_url: "https://placehold.co/400x225/FFD700/333333?text=Cine+Clássicos",
        category: ChannelCategory::Movies,
        description: "Filmes clássicos que marcaram época.",
    },
];

/// Channels inserted into an empty catalog, one per category at least
pub fn default_channels() -> Vec<ChannelDraft> {
    SAMPLE_CHANNELS
        .iter()
        .map(|sample| ChannelDraft {
            name: sample.name.to_string(),
            stream_url: sample.stream_url.to_string(),
            thumbnail_url: Some(sample.thumbnail_url.to_string()),
            logo_url: None,
            category: sample.category,
            description: sample.description.to_string(),
        })
        .collect()
}
