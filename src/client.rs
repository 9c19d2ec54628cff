use crate::domain::model::{
    BookSeatsRequest, BusySeatsResponse, CinemaSpec, CinemasResponse, FilmsResponse,
    ReasonResponse, RegisterCinemasRequest, SeatsResponse,
};
use crate::utils::error::{CinemaError, Result};
use crate::utils::validation::validate_url;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Typed client for the cinema HTTP API.
#[derive(Debug, Clone)]
pub struct CinemaClient {
    base_url: Url,
    http: Client,
}

impl CinemaClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: validate_url("base_url", base_url)?,
            http: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CinemaError::ConfigError {
                message: format!("{} cannot be used as a base URL", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn register_cinemas(&self, cinemas: &[CinemaSpec]) -> Result<()> {
        let body = RegisterCinemasRequest {
            cinemas: cinemas.to_vec(),
        };
        let response = self
            .http
            .post(self.url(&["cinemas", ""])?)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            StatusCode::BAD_REQUEST => {
                let reason: ReasonResponse = response.json().await?;
                Err(CinemaError::InvalidRequest {
                    message: reason.reason,
                })
            }
            _ => Err(unexpected(response).await),
        }
    }

    pub async fn list_cinemas(&self) -> Result<Vec<String>> {
        let response: CinemasResponse = self.get_json(&["cinemas", ""]).await?;
        Ok(response.cinemas)
    }

    pub async fn films_of(&self, cinema: &str) -> Result<Vec<String>> {
        let response = self.http.get(self.url(&["cinemas", cinema])?).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CinemaError::CinemaNotFound {
                name: cinema.to_string(),
            });
        }
        let films: FilmsResponse = ok_json(response).await?;
        Ok(films.films)
    }

    pub async fn all_films(&self) -> Result<Vec<String>> {
        let response: FilmsResponse = self.get_json(&["cinemas", "films"]).await?;
        Ok(response.films)
    }

    pub async fn cinemas_showing(&self, film: &str) -> Result<Vec<String>> {
        let response: CinemasResponse = self.get_json(&["cinemas", "films", film]).await?;
        Ok(response.cinemas)
    }

    pub async fn seats(&self, cinema: &str, film: &str) -> Result<Vec<String>> {
        self.fetch_seats(cinema, film, false).await
    }

    pub async fn available_seats(&self, cinema: &str, film: &str) -> Result<Vec<String>> {
        self.fetch_seats(cinema, film, true).await
    }

    async fn fetch_seats(&self, cinema: &str, film: &str, available: bool) -> Result<Vec<String>> {
        let mut request = self.http.get(self.url(&["cinemas", cinema, film])?);
        if available {
            request = request.query(&[("available", "true")]);
        }
        let response = request.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(film_not_found(cinema, film));
        }
        let seats: SeatsResponse = ok_json(response).await?;
        Ok(seats.seats)
    }

    /// Books `seats`; a conflict comes back as `CinemaError::SeatsBusy`.
    pub async fn book_seats(&self, cinema: &str, film: &str, seats: &[String]) -> Result<()> {
        let body = BookSeatsRequest {
            seats: seats.to_vec(),
        };
        let response = self
            .http
            .post(self.url(&["cinemas", cinema, film])?)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            StatusCode::NOT_FOUND => Err(film_not_found(cinema, film)),
            StatusCode::BAD_REQUEST => {
                let body: serde_json::Value = response.json().await?;
                if body.get("busy_seats").is_some() {
                    let busy: BusySeatsResponse = serde_json::from_value(body)?;
                    return Err(CinemaError::SeatsBusy {
                        busy_seats: busy.busy_seats,
                    });
                }
                let reason: ReasonResponse = serde_json::from_value(body)?;
                Err(CinemaError::InvalidRequest {
                    message: reason.reason,
                })
            }
            _ => Err(unexpected(response).await),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let response = self.http.get(self.url(segments)?).send().await?;
        ok_json(response).await
    }
}

// A 404 on a seat route does not say whether the cinema or the film was missing.
fn film_not_found(cinema: &str, film: &str) -> CinemaError {
    CinemaError::FilmNotFound {
        cinema: cinema.to_string(),
        film: film.to_string(),
    }
}

async fn ok_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if response.status() != StatusCode::OK {
        return Err(unexpected(response).await);
    }
    Ok(response.json().await?)
}

async fn unexpected(response: Response) -> CinemaError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    CinemaError::UnexpectedResponse { status, body }
}
