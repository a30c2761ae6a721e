//! Package tables for the Realme GT 6 (Realme UI / ColorOS).

use std::collections::BTreeSet;
use std::fmt;

/// Bloatware that can go without affecting everyday use.
pub const SAFE_PACKAGES: &[&str] = &[
    "com.coloros.browser",          // Default browser
    "com.heytap.browser",           // Default browser
    "com.coloros.assistantscreen",  // Realme's take on Google Discover
    "com.oppo.market",              // App Market
    "com.heytap.market",            // App Market
    "com.opos.cs",                  // Hot Apps / Games recommendations
    "com.realme.hotapps",           // Hot Apps / Games recommendations
    "com.coloros.video",            // Video player
    "com.heytap.music",             // Music player
    "com.heytap.cloud",             // HeyTap Cloud
    "com.facebook.system",          // Facebook services
    "com.facebook.appmanager",      // Facebook app manager
    "com.facebook.katana",          // Facebook
    "com.finshell.fin",             // Payment service (non-EU)
    "com.glance.internet",          // Lockscreen content
    "com.realmestore.app",          // Realme Store
    "com.realmecomm.app",           // Realme Community
    "com.heytap.pictorial",         // Lockscreen magazine
    // Xiaomi / Mi leftovers
    "com.mi.android.globalFileexplorer", // Mi File Manager
    "com.mi.global.shop",                // Mi Store
    "com.miui.videoplayer",              // Mi Video
    "com.mi.globalbrowser",              // Mi Browser
    "com.mi.global.bbs",                 // Mi Community
    "com.xiaomi.smarthome",              // Mi Home
    "com.xiaomi.hm.health",              // Mi Fitness
    "com.xiaomi.router",                 // Mi Wi-Fi
];

/// Stock utilities and system extras; only removed by the full profile.
pub const ADVANCED_PACKAGES: &[&str] = &[
    "com.oppo.gamecenter",          // Game Center
    "com.coloros.gamespaceui",      // Game Space
    "com.coloros.phonemanager",     // Phone Manager
    "com.coloros.filemanager",      // File Manager
    "com.coloros.weather2",         // Weather
    "com.coloros.soundrecorder",    // Sound Recorder
    "com.heytap.themestore",        // Theme Store
    "com.heytap.usercenter",        // HeyTap account center
    "com.coloros.calculator",       // Calculator
    "com.coloros.alarmclock",       // Clock; install a replacement first
    // Realme UI / ColorOS components
    "com.oplus.themestore",         // Theme Store (newer package name)
    "com.oplus.wallpapers",         // Wallpapers
    "com.coloros.childrenspace",    // Kids mode
    "com.coloros.translate",        // Translate front-end
    "com.coloros.translate.engine", // Translate engine
    "com.oplus.weather.service",    // Weather backend
    "com.oplus.safecenter",         // Optimizer
    "com.oplus.screenrecorder",     // Screen recorder
    "com.oplus.statistics.rom",     // Telemetry
    "com.oplus.smartengine",        // Smart Engine analytics
    "com.oplus.operationManual",    // User manual
    "com.oplus.beaconlink",         // Device-to-device discovery
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Safe set only.
    Minimal,
    /// Safe and advanced sets.
    Full,
}

impl Profile {
    pub fn from_minimal_flag(minimal: bool) -> Self {
        if minimal {
            Profile::Minimal
        } else {
            Profile::Full
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Minimal => "minimal",
            Profile::Full => "full",
        }
    }

    /// Sorted, deduplicated package names for this profile.
    pub fn packages(self) -> Vec<&'static str> {
        let mut set: BTreeSet<&'static str> = SAFE_PACKAGES.iter().copied().collect();
        if self == Profile::Full {
            set.extend(ADVANCED_PACKAGES.iter().copied());
        }
        set.into_iter().collect()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
