//! Fixture users and products loaded by the seed.

pub struct SeedUser {
    pub email: &'static str,
    pub full_name: &'static str,
    pub password: &'static str,
    pub roles: &'static [&'static str],
}

pub struct SeedProduct {
    pub title: &'static str,
    pub description: &'static str,
    pub price: f64,
    pub stock: i32,
    pub sizes: &'static [&'static str],
    pub gender: &'static str,
    pub tags: &'static [&'static str],
    pub images: &'static [&'static str],
}

// first user owns every seeded product
pub const USERS: &[SeedUser] = &[
    SeedUser { email: "test1@google.com", full_name: "Test One", password: "Abc123", roles: &["admin"] },
    SeedUser { email: "test2@google.com", full_name: "Test Two", password: "Abc123", roles: &["user", "super-user"] },
];

pub const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        title: "Men's Chill Crew Neck Sweatshirt",
        description: "Relaxed crew neck in a premium heavyweight exterior and soft fleece interior.",
        price: 75.0,
        stock: 7,
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        gender: "men",
        tags: &["sweatshirt"],
        images: &["1740176-00-A_0_2000.jpg", "1740176-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Quilted Shirt Jacket",
        description: "Modern quilted shirt jacket with a relaxed fit and snap closure.",
        price: 200.0,
        stock: 5,
        sizes: &["XS", "S", "M", "XL", "XXL"],
        gender: "men",
        tags: &["jacket"],
        images: &["1740507-00-A_0_2000.jpg", "1740507-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Raven Lightweight Zip Up Bomber Jacket",
        description: "Lightweight bomber with a water resistant shell and matte zipper.",
        price: 130.0,
        stock: 10,
        sizes: &["S", "M", "L", "XL", "XXL"],
        gender: "men",
        tags: &["shirt"],
        images: &["1740250-00-A_0_2000.jpg", "1740250-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Turbine Long Sleeve Tee",
        description: "Long sleeve tee in 100% cotton with a subtle logo on the chest.",
        price: 45.0,
        stock: 50,
        sizes: &["XS", "S", "M", "L"],
        gender: "men",
        tags: &["shirt"],
        images: &["1740280-00-A_0_2000.jpg", "1740280-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Men's Cybertruck Owl Tee",
        description: "Cotton tee with the Cybertruck owl graphic printed on the front.",
        price: 35.0,
        stock: 0,
        sizes: &["M", "L", "XL", "XXL"],
        gender: "men",
        tags: &["shirt"],
        images: &["7654393-00-A_2_2000.jpg", "7654393-00-A_3.jpg"],
    },
    SeedProduct {
        title: "Women's Cropped Puffer Jacket",
        description: "Cropped puffer with a water resistant shell and a lightweight fill.",
        price: 225.0,
        stock: 85,
        sizes: &["XS", "S", "M"],
        gender: "women",
        tags: &["hoodie"],
        images: &["1740535-00-A_0_2000.jpg", "1740535-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Chill Half Zip Cropped Hoodie",
        description: "Half zip hoodie cut to a cropped length with kangaroo pocket.",
        price: 130.0,
        stock: 10,
        sizes: &["XS", "S", "M", "XXL"],
        gender: "women",
        tags: &["hoodie"],
        images: &["1740226-00-A_0_2000.jpg", "1740226-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Raven Slouchy Crew Sweatshirt",
        description: "Slouchy crew neck with dropped shoulders and a relaxed silhouette.",
        price: 110.0,
        stock: 9,
        sizes: &["XS", "S", "M", "L", "XL", "XXL"],
        gender: "women",
        tags: &["hoodie"],
        images: &["1740260-00-A_0_2000.jpg", "1740260-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Women's Turbine Cropped Long Sleeve Tee",
        description: "Fitted long sleeve tee cropped at the waist.",
        price: 45.0,
        stock: 24,
        sizes: &["XS", "S", "M", "L"],
        gender: "women",
        tags: &["shirt"],
        images: &["1740290-00-A_0_2000.jpg", "1740290-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Kids Cybertruck Long Sleeve Tee",
        description: "Kids long sleeve tee with the Cybertruck graffiti graphic.",
        price: 30.0,
        stock: 10,
        sizes: &["XS", "S", "M"],
        gender: "kid",
        tags: &["shirt"],
        images: &["1742694-00-A_1_2000.jpg", "1742694-00-A_3.jpg"],
    },
    SeedProduct {
        title: "Kids Scribble T Logo Tee",
        description: "Kids tee with a hand drawn scribble logo.",
        price: 25.0,
        stock: 0,
        sizes: &["XS", "S", "M"],
        gender: "kid",
        tags: &["shirt"],
        images: &["8529312-00-A_0_2000.jpg", "8529312-00-A_1.jpg"],
    },
    SeedProduct {
        title: "Made on Earth by Humans Onesie",
        description: "Onesie in soft cotton with the Made on Earth by Humans print.",
        price: 30.0,
        stock: 16,
        sizes: &["XS", "S"],
        gender: "kid",
        tags: &["shirt"],
        images: &["1473809-00-A_1_2000.jpg", "1473809-00-A_alt.jpg"],
    },
    SeedProduct {
        title: "Let the Sun Shine Tote",
        description: "Canvas tote bag printed with the Let the Sun Shine slogan.",
        price: 20.0,
        stock: 40,
        sizes: &["M"],
        gender: "unisex",
        tags: &["bag"],
        images: &["1657891-00-A_0_2000.jpg"],
    },
];
