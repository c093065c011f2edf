// Mind map services
// Bundled UI assets served to the WebView over the custom protocol.

pub mod assets;
