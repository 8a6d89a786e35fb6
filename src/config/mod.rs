//! Configuration module for the name resolver

mod resolver_config;

pub use resolver_config::{
    DomainConfig, ResolverConfig, SearchConfig, ARTISTS_DOMAIN, CARDS_DOMAIN,
};
