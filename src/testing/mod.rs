mod fake_localization_client;

pub use fake_localization_client::FakeLocalizationClient;
