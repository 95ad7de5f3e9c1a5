pub mod error;

pub mod service {
    pub mod config_service;
    pub mod file;
    pub mod transcoder;

    pub mod traits {
        pub mod i_service;
    }
}

pub mod config {
    pub mod config;
    pub mod ports;
}

pub mod action {
    pub mod cli;
}

pub mod facade {
    pub mod conversion_facade;

    pub mod traits {
        pub mod i_conversion;
    }
}

pub mod models {
    pub mod conversion;
    pub mod file;
    pub mod transcode;
}

pub mod utils {
    pub mod command;
    pub mod logging;
    pub mod utils;
}
