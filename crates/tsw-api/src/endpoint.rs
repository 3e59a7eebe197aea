// Device API paths and response-shape descriptors.

/// Login form. `GET` yields the tracking cookie, `POST` submits credentials.
pub const LOGIN: &str = "/userlogin.html";
/// Clears any server-side session before a fresh credential POST.
pub const LOGOUT: &str = "/logout";
pub const DEVICE_INFO: &str = "/Device/DeviceInfo";
pub const DEVICE_CAPABILITIES: &str = "/Device/DeviceCapabilities";
pub const SYSTEM_VERSIONS: &str = "/Device/SystemVersions";
pub const NETWORK_ADAPTERS: &str = "/Device/NetworkAdapters";
pub const DISPLAY: &str = "/Device/Display";

/// Response header carrying the anti-forgery token after login.
pub const CSRF_RESPONSE_HEADER: &str = "CREST-XSRF-TOKEN";
/// Request header echoing the anti-forgery token on POSTs.
pub const CSRF_REQUEST_HEADER: &str = "X-CREST-XSRF-TOKEN";

/// Where a typed payload lives inside an endpoint's JSON response.
///
/// Every response is rooted at a `Device` object; each shape names the
/// sub-tree to deserialize and whether it is a single object or an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseShape {
    DeviceInfo,
    DeviceCapabilities,
    SystemVersions,
    NetworkAdapters,
    Display,
}

impl ResponseShape {
    /// The endpoint that serves this shape.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::DeviceInfo => DEVICE_INFO,
            Self::DeviceCapabilities => DEVICE_CAPABILITIES,
            Self::SystemVersions => SYSTEM_VERSIONS,
            Self::NetworkAdapters => NETWORK_ADAPTERS,
            Self::Display => DISPLAY,
        }
    }

    /// JSON pointer to the payload within the response body.
    pub fn pointer(self) -> &'static str {
        match self {
            Self::DeviceInfo => "/Device/DeviceInfo",
            Self::DeviceCapabilities => "/Device/DeviceCapabilities",
            Self::SystemVersions => "/Device/SystemVersions/Components",
            Self::NetworkAdapters => "/Device/NetworkAdapters",
            Self::Display => "/Device/Display",
        }
    }

    /// `true` if the payload is an array of items.
    pub fn is_collection(self) -> bool {
        matches!(self, Self::SystemVersions)
    }

    /// Short name of the payload type, used in log lines.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::DeviceInfo => "DeviceInfo",
            Self::DeviceCapabilities => "DeviceCapabilities",
            Self::SystemVersions => "SystemVersion[]",
            Self::NetworkAdapters => "NetworkAdapters",
            Self::Display => "DeviceDisplay",
        }
    }
}
