use crate::api::dispatch::distance::{haversine_miles, zip_distance};
use crate::api::dispatch::interfaces::{AvailableJob, DistanceBasis, JobDistance};
use crate::database::employee::ServiceArea;
use crate::database::job::Job;
use common_types::GeoPoint;

/// Where distances are measured from: the employee's live position if known, and the
/// zip of their primary service area for the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct Origin<'a> {
    pub point: Option<GeoPoint>,
    pub zip: Option<&'a str>,
}

/// Haversine when both ends have coordinates, else the zip proxy, else unknown.
#[must_use]
pub fn job_distance(origin: Origin<'_>, job: &Job, zip_cap: u32) -> Option<JobDistance> {
    if let (Some(from), Some(to)) = (origin.point, job.location()) {
        return Some(JobDistance {
            value: haversine_miles(from, to),
            basis: DistanceBasis::Haversine,
        });
    }
    let zip = origin.zip?;
    zip_distance(zip, &job.zip, zip_cap).map(|d| JobDistance {
        value: f64::from(d),
        basis: DistanceBasis::ZipCode,
    })
}

/// Whether a job lies inside one service area.
#[must_use]
pub fn in_service_area(job: &Job, area: &ServiceArea, zip_cap: u32) -> bool {
    if let (Some(center), Some(location)) = (area.center(), job.location()) {
        return haversine_miles(center, location) <= area.radius_miles;
    }
    zip_distance(&area.zip, &job.zip, zip_cap).is_some_and(|d| f64::from(d) <= area.radius_miles)
}

/// Employees without configured areas see every job.
#[must_use]
pub fn in_any_service_area(job: &Job, areas: &[ServiceArea], zip_cap: u32) -> bool {
    areas.is_empty() || areas.iter().any(|area| in_service_area(job, area, zip_cap))
}

/// Filters candidates to the employee's service areas, sorts them by distance with
/// unknown distances last, and keeps the closest `limit`.
#[must_use]
pub fn closest_jobs(
    candidates: Vec<Job>,
    areas: &[ServiceArea],
    origin: Origin<'_>,
    zip_cap: u32,
    limit: usize,
) -> Vec<AvailableJob> {
    let mut ranked: Vec<AvailableJob> = candidates
        .into_iter()
        .filter(|job| in_any_service_area(job, areas, zip_cap))
        .map(|job| AvailableJob {
            distance: job_distance(origin, &job, zip_cap),
            job,
        })
        .collect();

    // `sort_by` is stable, so equal distances keep their schedule order.
    ranked.sort_by(|a, b| match (a.distance, b.distance) {
        (Some(a), Some(b)) => a.value.total_cmp(&b.value),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use common_types::{JobStatus, PaymentStatus};

    pub(crate) fn job(id: i64, zip: &str, location: Option<GeoPoint>) -> Job {
        let now = Utc::now();
        Job {
            id,
            customer_id: 1,
            employee_id: None,
            status: JobStatus::Scheduled,
            scheduled_at: now,
            street: format!("{id} Main St"),
            city: "Springfield".to_string(),
            state: "MA".to_string(),
            zip: zip.to_string(),
            latitude: location.map(|p| p.lat),
            longitude: location.map(|p| p.lon),
            locked: false,
            payment_status: PaymentStatus::Unpaid,
            price_cents: 4_000,
            employee_earnings_cents: 2_500,
            payout_id: None,
            rating: None,
            claimed_at: None,
            started_at: None,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn area(zip: &str, radius_miles: f64, center: Option<GeoPoint>) -> ServiceArea {
        ServiceArea {
            id: 1,
            employee_id: 7,
            zip: zip.to_string(),
            radius_miles,
            latitude: center.map(|p| p.lat),
            longitude: center.map(|p| p.lon),
            created_at: Utc::now(),
        }
    }

    const HOME: GeoPoint = GeoPoint::new(42.3601, -71.0589);

    fn north_of_home(miles: f64) -> GeoPoint {
        // One degree of latitude is ~69.09 miles.
        GeoPoint::new(HOME.lat + miles / 69.09, HOME.lon)
    }

    #[test]
    fn prefers_haversine_over_zip() {
        let origin = Origin {
            point: Some(HOME),
            zip: Some("02108"),
        };
        let d = job_distance(origin, &job(1, "02999", Some(north_of_home(3.0))), 50).unwrap();
        assert_eq!(d.basis, DistanceBasis::Haversine);
        assert!((d.value - 3.0).abs() < 0.05);
    }

    #[test]
    fn falls_back_to_zip_and_then_to_unknown() {
        let with_zip = Origin {
            point: Some(HOME),
            zip: Some("02108"),
        };
        let d = job_distance(with_zip, &job(1, "02118", None), 50).unwrap();
        assert_eq!(d.basis, DistanceBasis::ZipCode);
        assert!((d.value - 10.0).abs() < f64::EPSILON);

        assert!(job_distance(Origin::default(), &job(2, "02118", None), 50).is_none());
        assert!(job_distance(with_zip, &job(3, "unknown", None), 50).is_none());
    }

    #[test]
    fn service_area_uses_radius() {
        let circle = area("02108", 5.0, Some(HOME));
        assert!(in_service_area(&job(1, "99999", Some(north_of_home(4.0))), &circle, 50));
        assert!(!in_service_area(&job(2, "02108", Some(north_of_home(6.0))), &circle, 50));

        // Without coordinates the zip proxy is compared to the radius.
        let zip_only = area("02108", 5.0, None);
        assert!(in_service_area(&job(3, "02110", None), &zip_only, 50));
        assert!(!in_service_area(&job(4, "02120", None), &zip_only, 50));
        assert!(!in_service_area(&job(5, "n/a", None), &zip_only, 50));
    }

    #[test]
    fn no_areas_means_no_filter() {
        assert!(in_any_service_area(&job(1, "n/a", None), &[], 50));
    }

    #[test]
    fn closest_jobs_sorted_truncated_unknown_last() {
        let candidates = vec![
            job(1, "n/a", None),
            job(2, "02108", Some(north_of_home(8.0))),
            job(3, "02108", Some(north_of_home(1.0))),
            job(4, "02108", Some(north_of_home(4.0))),
            job(5, "n/a", None),
        ];
        let origin = Origin {
            point: Some(HOME),
            zip: Some("02108"),
        };

        let all = closest_jobs(candidates.clone(), &[], origin, 50, 10);
        let ids: Vec<i64> = all.iter().map(|j| j.job.id).collect();
        assert_eq!(ids, vec![3, 4, 2, 1, 5]);

        let top = closest_jobs(candidates, &[], origin, 50, 2);
        assert_eq!(top.len(), 2);
        assert!(top[0].distance.unwrap().value <= top[1].distance.unwrap().value);
    }

    #[test]
    fn closest_jobs_never_exceeds_limit_and_is_non_decreasing() {
        let candidates: Vec<Job> = (0..25)
            .map(|i| job(i, "02108", Some(north_of_home((i * 7 % 25) as f64))))
            .collect();
        let origin = Origin {
            point: Some(HOME),
            zip: None,
        };
        let ranked = closest_jobs(candidates, &[], origin, 50, 10);
        assert_eq!(ranked.len(), 10);
        assert!(ranked.windows(2).all(|w| {
            w[0].distance.unwrap().value <= w[1].distance.unwrap().value
        }));
    }

    #[test]
    fn closest_jobs_applies_service_areas() {
        let areas = [area("02108", 5.0, Some(HOME))];
        let candidates = vec![
            job(1, "02108", Some(north_of_home(2.0))),
            job(2, "02108", Some(north_of_home(20.0))),
        ];
        let origin = Origin {
            point: Some(HOME),
            zip: Some("02108"),
        };
        let ranked = closest_jobs(candidates, &areas, origin, 50, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].job.id, 1);
    }
}
