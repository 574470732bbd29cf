//! The batch run: cities in, topics, TOCs and snippets out.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::{
    assemble::{OverviewSnippet, Toc, Topic, TopicAssembler},
    config::{Config, ProjectLayout},
    geography::Continent,
    markup::Document,
    normalize::normalize,
    provider::{City, CityDirectory, GeonamesDirectory, OpenWeatherProvider, WeatherProvider},
};

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub topics: usize,
    pub per_region: BTreeMap<Continent, usize>,
}

#[derive(Debug)]
pub struct Generator {
    weather: Box<dyn WeatherProvider>,
    cities: Box<dyn CityDirectory>,
    assembler: TopicAssembler,
    layout: ProjectLayout,
    city_count: u32,
    min_population: u64,
    extra_cities: Vec<String>,
}

impl Generator {
    pub fn new(
        weather: Box<dyn WeatherProvider>,
        cities: Box<dyn CityDirectory>,
        assembler: TopicAssembler,
        config: &Config,
    ) -> Self {
        Self {
            weather,
            cities,
            assembler,
            layout: config.project.clone(),
            city_count: config.cities.count,
            min_population: config.cities.min_population,
            extra_cities: config.cities.extra.clone(),
        }
    }

    /// Wire the OpenWeather and geonames clients from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        config.validate()?;

        let weather = OpenWeatherProvider::with_url(
            config.api_key()?.to_string(),
            config.weather.url.clone(),
        );
        let cities = GeonamesDirectory::with_url(config.cities.url.clone());
        let assembler = TopicAssembler::new(config.current_fields()?);

        Ok(Self::new(Box::new(weather), Box::new(cities), assembler, config))
    }

    /// Run the whole batch. The first failure aborts it; files already
    /// written stay on disk.
    pub async fn run(&self) -> Result<RunSummary> {
        info!("Requesting data for top {} cities", self.city_count);
        let cities = self.collect_cities().await?;

        info!("Initializing TOCs and snippets");
        let mut tocs = BTreeMap::new();
        let mut snippets = BTreeMap::new();
        for continent in Continent::REGIONS {
            let toc_path = self.layout.toc_path(continent);
            let toc = Toc::open(&toc_path)
                .with_context(|| format!("Failed to initialize TOC {}", toc_path.display()))?;
            tocs.insert(continent, toc);

            let snippet_path = self.layout.snippet_path(continent);
            let snippet = OverviewSnippet::open(&snippet_path).with_context(|| {
                format!("Failed to initialize snippet {}", snippet_path.display())
            })?;
            snippets.insert(continent, snippet);
        }

        let mut summary = RunSummary::default();
        for city in &cities {
            let continent = self.process_city(city).await?;
            summary.topics += 1;

            if !continent.has_region() {
                warn!(
                    city = %city.ascii_name,
                    %continent,
                    "no regional TOC or snippet; topic left out of navigation"
                );
                continue;
            }
            if let Some(toc) = tocs.get_mut(&continent) {
                toc.add_entry(continent, &city.ascii_name)?;
            }
            if let Some(snippet) = snippets.get_mut(&continent) {
                snippet.add_entry(continent, &city.ascii_name)?;
            }
            *summary.per_region.entry(continent).or_default() += 1;
        }

        info!("Saving TOCs and snippets");
        for toc in tocs.values() {
            toc.save()?;
        }
        for snippet in snippets.values() {
            snippet.save()?;
        }

        Ok(summary)
    }

    /// Most populous cities plus the configured extras, sorted by ASCII name
    /// with duplicates dropped.
    pub async fn collect_cities(&self) -> Result<Vec<City>> {
        let mut cities = self
            .cities
            .largest(self.city_count, self.min_population)
            .await
            .context("Failed to list largest cities")?;

        for name in &self.extra_cities {
            let found = self
                .cities
                .by_ascii_name(name)
                .await
                .with_context(|| format!("Failed to look up city '{name}'"))?;
            if found.is_empty() {
                warn!(city = %name, "extra city not found");
            }
            cities.extend(found);
        }

        cities.sort_by(|a, b| a.ascii_name.cmp(&b.ascii_name));
        cities.dedup_by(|a, b| a.ascii_name == b.ascii_name);
        Ok(cities)
    }

    /// Fetch, normalize, render and save one city's topic.
    async fn process_city(&self, city: &City) -> Result<Continent> {
        info!("Getting weather data for {}", city.ascii_name);

        let raw = self
            .weather
            .fetch(city.coordinates())
            .await
            .with_context(|| format!("Failed to fetch weather for {}", city.ascii_name))?;
        let record = normalize(&raw)
            .with_context(|| format!("Failed to normalize weather for {}", city.ascii_name))?;

        let continent = Continent::from_country_code(&city.country_code)?;
        let path = self.layout.topic_path(continent, &city.ascii_name);

        let mut topic = Topic::open(&path, &city.ascii_name)?;
        self.assembler.render(topic.document_mut(), &record)?;
        topic.save()?;

        Ok(continent)
    }
}

/// Render a saved provider response into a single topic, without touching
/// TOCs or snippets.
pub fn render_file(
    input: &Path,
    output: &Path,
    title: &str,
    assembler: &TopicAssembler,
) -> Result<Document> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {} as JSON", input.display()))?;
    let record = normalize(&raw)?;

    let mut topic = Topic::open(output, title)?;
    assembler.render(topic.document_mut(), &record)?;
    topic.save()?;

    info!(path = %output.display(), "rendered topic");
    Ok(topic.document().clone())
}
