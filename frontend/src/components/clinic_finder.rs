use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{GeolocationPosition, GeolocationPositionError};
use yew::prelude::*;

const LOCATION_ERROR: &str = "Error getting your location. Please enable location services.";
const UNSUPPORTED_ERROR: &str = "Geolocation is not supported by your browser.";

/// Demonstration roster, one facility per compass quadrant around the user.
const FACILITY_ROSTER: [(&str, &str, f64, f64); 4] = [
    ("City General Hospital", "Hospital", 0.01, 0.01),
    ("Medical Center", "Medical Center", -0.01, 0.01),
    ("Skin Care Clinic", "Clinic", 0.01, -0.01),
    ("Community Health Center", "Health Center", -0.01, -0.01),
];

pub enum FinderMsg {
    Locate,
    Located { latitude: f64, longitude: f64 },
    Failed(String),
}

enum FinderState {
    Idle,
    Locating,
    Located { latitude: f64, longitude: f64 },
    Failed(String),
}

type GeoCallbacks = (
    Closure<dyn FnMut(GeolocationPosition)>,
    Closure<dyn FnMut(GeolocationPositionError)>,
);

/// Locates the user and lists nearby facilities with distances. The map
/// canvas itself lives with an external widget; this section owns the cards.
pub struct ClinicFinder {
    state: FinderState,
    geo_callbacks: Option<GeoCallbacks>,
}

impl Component for ClinicFinder {
    type Message = FinderMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            state: FinderState::Idle,
            geo_callbacks: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            FinderMsg::Locate => {
                // Searching again clears the previous results first.
                self.state = FinderState::Locating;
                self.request_location(ctx);
                true
            }
            FinderMsg::Located {
                latitude,
                longitude,
            } => {
                self.geo_callbacks.take();
                self.state = FinderState::Located {
                    latitude,
                    longitude,
                };
                true
            }
            FinderMsg::Failed(message) => {
                self.geo_callbacks.take();
                self.state = FinderState::Failed(message);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let locating = matches!(self.state, FinderState::Locating);

        html! {
            <section class="clinic-finder">
                <h2><i class="fa-solid fa-map-location-dot"></i>{" Find a Dermatologist Near You"}</h2>
                <button
                    class="analyze-btn"
                    onclick={ctx.link().callback(|_| FinderMsg::Locate)}
                    disabled={locating}
                >
                    { if locating {
                        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Locating..."}</> }
                    } else {
                        html! { <><i class="fa-solid fa-location-crosshairs"></i>{" Find Nearby Clinics"}</> }
                    }}
                </button>
                <div id="dermatologists-list" class="dermatologists-list">
                    { self.render_results() }
                </div>
            </section>
        }
    }
}

impl ClinicFinder {
    fn request_location(&mut self, ctx: &Context<Self>) {
        let navigator = web_sys::window().unwrap().navigator();
        let geolocation = match navigator.geolocation() {
            Ok(geolocation) => geolocation,
            Err(_) => {
                ctx.link()
                    .send_message(FinderMsg::Failed(UNSUPPORTED_ERROR.to_string()));
                return;
            }
        };

        let link = ctx.link().clone();
        let on_position =
            Closure::<dyn FnMut(GeolocationPosition)>::new(move |position: GeolocationPosition| {
                let coordinates = position.coords();
                link.send_message(FinderMsg::Located {
                    latitude: coordinates.latitude(),
                    longitude: coordinates.longitude(),
                });
            });
        let link = ctx.link().clone();
        let on_error = Closure::<dyn FnMut(GeolocationPositionError)>::new(
            move |error: GeolocationPositionError| {
                log::error!("Error getting location ({}): {}", error.code(), error.message());
                link.send_message(FinderMsg::Failed(LOCATION_ERROR.to_string()));
            },
        );

        if geolocation
            .get_current_position_with_error_callback(
                on_position.as_ref().unchecked_ref::<js_sys::Function>(),
                Some(on_error.as_ref().unchecked_ref::<js_sys::Function>()),
            )
            .is_err()
        {
            ctx.link()
                .send_message(FinderMsg::Failed(LOCATION_ERROR.to_string()));
            return;
        }
        // The callbacks must outlive the request; dropped once it settles.
        self.geo_callbacks = Some((on_position, on_error));
    }

    fn render_results(&self) -> Html {
        match &self.state {
            FinderState::Idle | FinderState::Locating => html! {},
            FinderState::Failed(message) => html! { <p class="error">{ message }</p> },
            FinderState::Located {
                latitude,
                longitude,
            } => html! {
                <>
                    { render_location_card("Your Location", None, *latitude, *longitude, None) }
                    { for nearby_facilities(*latitude, *longitude).into_iter().map(|facility| {
                        let distance = haversine_km(
                            *latitude,
                            *longitude,
                            facility.latitude,
                            facility.longitude,
                        );
                        render_location_card(
                            facility.name,
                            Some(facility.kind),
                            facility.latitude,
                            facility.longitude,
                            Some(distance),
                        )
                    })}
                </>
            },
        }
    }
}

pub struct Facility {
    pub name: &'static str,
    pub kind: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

pub fn nearby_facilities(latitude: f64, longitude: f64) -> Vec<Facility> {
    FACILITY_ROSTER
        .iter()
        .map(|(name, kind, lat_offset, lng_offset)| Facility {
            name,
            kind,
            latitude: latitude + lat_offset,
            longitude: longitude + lng_offset,
        })
        .collect()
}

fn render_location_card(
    name: &str,
    kind: Option<&str>,
    latitude: f64,
    longitude: f64,
    distance_km: Option<f64>,
) -> Html {
    let directions = format!(
        "https://www.google.com/maps/dir/?api=1&destination={latitude},{longitude}"
    );

    html! {
        <div class="dermatologist-card">
            <h3>{ name }</h3>
            { kind
                .map(|kind| html! { <p><i class="fa-solid fa-hospital"></i>{ format!(" {kind}") }</p> })
                .unwrap_or_default() }
            <p>
                <i class="fa-solid fa-map-marker-alt"></i>
                { format!(" Location: {latitude:.4}, {longitude:.4}") }
            </p>
            { distance_km
                .map(|d| html! { <p><i class="fa-solid fa-route"></i>{ format!(" Approximately {d:.1} km away") }</p> })
                .unwrap_or_default() }
            <a
                href={directions}
                target="_blank"
                rel="noopener noreferrer"
                class="directions-btn"
            >
                <i class="fa-solid fa-diamond-turn-right"></i>{" Get Directions"}
            </a>
        </div>
    }
}

/// Great-circle distance between two coordinates, in kilometres.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::{haversine_km, nearby_facilities};

    #[test]
    fn identical_points_are_zero_km_apart() {
        assert!(haversine_km(51.5, -0.12, 51.5, -0.12).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let distance = haversine_km(10.0, 20.0, 11.0, 20.0);
        assert!((distance - 111.19).abs() < 0.1, "got {distance}");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(40.7, -74.0, 48.85, 2.35);
        let back = haversine_km(48.85, 2.35, 40.7, -74.0);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn roster_spreads_over_four_quadrants() {
        let facilities = nearby_facilities(12.0, 34.0);
        assert_eq!(facilities.len(), 4);
        let mut offsets: Vec<(bool, bool)> = facilities
            .iter()
            .map(|f| (f.latitude > 12.0, f.longitude > 34.0))
            .collect();
        offsets.sort();
        offsets.dedup();
        assert_eq!(offsets.len(), 4);
    }
}
