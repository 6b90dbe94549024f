//! Built-in source catalog, used when no override is supplied at startup.

/// `(name, feed url, category, language)`. Every built-in source is verified.
#[rustfmt::skip]
pub(super) const BUILTIN_SOURCES: &[(&str, &str, &str, &str)] = &[
    // General News
    ("Google News - Top Stories", "https://news.google.com/rss?hl=en-US&gl=US&ceid=US:en", "general", "en"),
    ("Google News - World", "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRGx1YlY4U0FtVnVHZ0pWVXlnQVAB?hl=en-US&gl=US&ceid=US:en", "general", "en"),
    ("Yahoo News - Top Stories", "https://news.yahoo.com/rss/", "general", "en"),
    ("Yahoo News - World", "https://news.yahoo.com/rss/world", "general", "en"),
    ("Baidu News - 热点", "https://news.baidu.com/rss/", "general", "zh"),
    ("BBC News - Top Stories", "https://feeds.bbci.co.uk/news/rss.xml", "general", "en"),
    ("CNN - Top Stories", "http://rss.cnn.com/rss/cnn_topstories.rss", "general", "en"),
    ("Reuters - World News", "http://feeds.reuters.com/Reuters/worldNews", "general", "en"),
    ("The Guardian - World", "https://www.theguardian.com/world/rss", "general", "en"),
    ("Al Jazeera - All News", "https://www.aljazeera.com/xml/rss/all.xml", "general", "en"),

    // Technology
    ("Google News - Technology", "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFp6TVdZU0FtVnVHZ0pWVXlnQVAB?hl=en-US&gl=US&ceid=US:en", "tech", "en"),
    ("Yahoo Tech", "https://news.yahoo.com/rss/tech", "tech", "en"),
    ("TechCrunch", "http://feeds.feedburner.com/TechCrunch/", "tech", "en"),
    ("Wired", "https://www.wired.com/feed/rss", "tech", "en"),
    ("The Verge", "https://www.theverge.com/rss/index.xml", "tech", "en"),
    ("Ars Technica", "https://feeds.arstechnica.com/arstechnica/index", "tech", "en"),
    ("Engadget", "https://www.engadget.com/rss.xml", "tech", "en"),
    ("CNET", "https://www.cnet.com/rss/news/", "tech", "en"),
    ("Mashable", "http://feeds.mashable.com/Mashable", "tech", "en"),
    ("Baidu Tech - 科技", "https://news.baidu.com/rss/tech", "tech", "zh"),

    // Business
    ("Google News - Business", "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRGx6TVdZU0FtVnVHZ0pWVXlnQVAB?hl=en-US&gl=US&ceid=US:en", "business", "en"),
    ("Yahoo Finance", "https://finance.yahoo.com/news/rss/", "business", "en"),
    ("Bloomberg", "https://www.bloomberg.com/feed/podcast/etf-report.xml", "business", "en"),
    ("Financial Times", "https://www.ft.com/rss/home/us", "business", "en"),
    ("Forbes", "https://www.forbes.com/real-time/feed2/", "business", "en"),
    ("CNBC", "https://www.cnbc.com/id/100003114/device/rss/rss.html", "business", "en"),
    ("MarketWatch", "http://feeds.marketwatch.com/marketwatch/topstories/", "business", "en"),
    ("The Wall Street Journal", "http://online.wsj.com/xml/rss/3_7085.xml", "business", "en"),
    ("Baidu Finance - 财经", "https://news.baidu.com/rss/finance", "business", "zh"),

    // Crypto
    ("Google News - Cryptocurrency", "https://news.google.com/rss/search?q=cryptocurrency&hl=en-US&gl=US&ceid=US:en", "crypto", "en"),
    ("CoinDesk", "https://www.coindesk.com/arc/outboundfeeds/rss/", "crypto", "en"),
    ("CoinTelegraph", "https://cointelegraph.com/rss", "crypto", "en"),
    ("Decrypt", "https://decrypt.co/feed", "crypto", "en"),
    ("Bitcoin Magazine", "https://bitcoinmagazine.com/.rss/full/", "crypto", "en"),
    ("The Block", "https://www.theblock.co/rss.xml", "crypto", "en"),

    // Science
    ("Google News - Science", "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFp6TVdZU0FtVnVHZ0pWVXlnQVAB?hl=en-US&gl=US&ceid=US:en", "science", "en"),
    ("Yahoo Science", "https://news.yahoo.com/rss/science", "science", "en"),
    ("ScienceDaily", "https://www.sciencedaily.com/rss/all.xml", "science", "en"),
    ("Nature", "https://www.nature.com/subjects/rss.xml", "science", "en"),
    ("Scientific American", "https://www.scientificamerican.com/feed/", "science", "en"),
    ("New Scientist", "https://www.newscientist.com/feed/home", "science", "en"),
    ("NASA Breaking News", "https://www.nasa.gov/rss/dyn/breaking_news.rss", "science", "en"),

    // Health
    ("Google News - Health", "https://news.google.com/rss/topics/CAAqIQgKIhtDQkFTRGdvSUwyMHZNR3QwTlRGU0FtVnVLQUFQAQ?hl=en-US&gl=US&ceid=US:en", "health", "en"),
    ("Yahoo Health", "https://news.yahoo.com/rss/health", "health", "en"),
    ("WebMD", "https://rssfeeds.webmd.com/rss/rss.aspx?RSSSource=RSS_PUBLIC", "health", "en"),
    ("Medical News Today", "https://www.medicalnewstoday.com/rss", "health", "en"),
    ("Healthline", "https://www.healthline.com/rss", "health", "en"),
    ("Mayo Clinic", "https://newsnetwork.mayoclinic.org/feed/", "health", "en"),
    ("NPR Health", "https://www.npr.org/rss/rss.php?id=1128", "health", "en"),

    // Sports
    ("Google News - Sports", "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFp6TVdZU0FtVnVHZ0pWVXlnQVAB?hl=en-US&gl=US&ceid=US:en", "sports", "en"),
    ("Yahoo Sports", "https://sports.yahoo.com/rss/", "sports", "en"),
    ("ESPN", "http://www.espn.com/espn/rss/news", "sports", "en"),
    ("BBC Sport", "http://feeds.bbci.co.uk/sport/rss.xml", "sports", "en"),
    ("CBS Sports", "https://www.cbssports.com/rss/headlines/", "sports", "en"),
    ("Sports Illustrated", "https://www.si.com/rss/si_topstories.rss", "sports", "en"),
    ("Baidu Sports - 体育", "https://news.baidu.com/rss/sports", "sports", "zh"),

    // Entertainment
    ("Google News - Entertainment", "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFp6TVdZU0FtVnVHZ0pWVXlnQVAB?hl=en-US&gl=US&ceid=US:en", "entertainment", "en"),
    ("Yahoo Entertainment", "https://news.yahoo.com/rss/entertainment", "entertainment", "en"),
    ("E! Online", "http://www.eonline.com/syndication/feeds/rssfeeds/topstories.xml", "entertainment", "en"),
    ("Variety", "https://variety.com/feed/", "entertainment", "en"),
    ("Rolling Stone", "https://www.rollingstone.com/feed/", "entertainment", "en"),
    ("TMZ", "https://www.tmz.com/rss.xml", "entertainment", "en"),
    ("People", "https://people.com/feed/", "entertainment", "en"),

    // Politics
    ("Google News - Politics", "https://news.google.com/rss/topics/CAAqJggKIiBDQkFTRWdvSUwyMHZNRFp6TVdZU0FtVnVHZ0pWVXlnQVAB?hl=en-US&gl=US&ceid=US:en", "politics", "en"),
    ("Yahoo Politics", "https://news.yahoo.com/rss/politics", "politics", "en"),
    ("Politico", "http://www.politico.com/rss/politicopicks.xml", "politics", "en"),
    ("The Hill", "http://thehill.com/rss/syndicator/19110", "politics", "en"),
    ("BBC Politics", "https://feeds.bbci.co.uk/news/politics/rss.xml", "politics", "en"),
    ("NPR Politics", "https://feeds.npr.org/1014/rss.xml", "politics", "en"),
    ("Reuters Politics", "https://www.reuters.com/politics/rss", "politics", "en"),

    // Environment
    ("Google News - Environment", "https://news.google.com/rss/search?q=environment+climate&hl=en-US&gl=US&ceid=US:en", "environment", "en"),
    ("BBC Environment", "https://feeds.bbci.co.uk/news/science_and_environment/rss.xml", "environment", "en"),
    ("Reuters Environment", "https://www.reuters.com/environment/rss", "environment", "en"),
    ("The Guardian Environment", "https://www.theguardian.com/environment/rss", "environment", "en"),
    ("Climate Change News", "https://www.climatechangenews.com/feed/", "environment", "en"),
    ("Inside Climate News", "https://insideclimatenews.org/feed/", "environment", "en"),

    // Chinese Sources (中文)
    ("Bilibili - 热门视频 (RSSHub)", "https://rsshub.app/bilibili/popular/all", "entertainment", "zh"),
    ("Bilibili - 科技区 (RSSHub)", "https://rsshub.app/bilibili/partion/36", "tech", "zh"),
    ("Bilibili - 游戏区 (RSSHub)", "https://rsshub.app/bilibili/partion/4", "entertainment", "zh"),
    ("Weibo - 热搜榜 (RSSHub)", "https://rsshub.app/weibo/search/hot", "social", "zh"),
    ("人民网 - 时政", "http://www.people.com.cn/rss/politics.xml", "politics", "zh"),
    ("人民网 - 科技", "http://www.people.com.cn/rss/it.xml", "tech", "zh"),
    ("中新网 - 国内新闻", "http://www.chinanews.com/rss/gn.xml", "general", "zh"),
    ("中新网 - 国际新闻", "http://www.chinanews.com/rss/gj.xml", "general", "zh"),
    ("新京报", "http://www.bjnews.com.cn/feed", "general", "zh"),
    ("知乎 - 每日精选", "https://www.zhihu.com/rss", "social", "zh"),
    ("少数派", "https://sspai.com/feed", "tech", "zh"),
    ("极客公园", "http://www.geekpark.net/rss", "tech", "zh"),
    ("爱范儿", "https://www.ifanr.com/feed", "tech", "zh"),
    ("cnBeta", "http://www.cnbeta.com/backend.php", "tech", "zh"),
    ("什么值得买", "http://feed.smzdm.com", "business", "zh"),
    ("好奇心日报", "http://www.qdaily.com/feed.xml", "general", "zh"),
    ("36氪", "https://36kr.com/feed", "business", "zh"),
    ("虎嗅网", "https://www.huxiu.com/rss/0.xml", "business", "zh"),
    ("澎湃新闻", "https://www.thepaper.cn/rss", "general", "zh"),
    ("界面新闻", "https://www.jiemian.com/rss", "business", "zh"),
    ("观察者网", "https://www.guancha.cn/rss", "politics", "zh"),
    ("财新网", "https://www.caixin.com/rss", "business", "zh"),
    ("第一财经", "https://www.yicai.com/rss", "business", "zh"),
    ("钛媒体", "https://www.tmtpost.com/rss", "tech", "zh"),
    ("DoNews", "https://www.donews.com/rss", "tech", "zh"),
    ("雷锋网", "https://www.leiphone.com/rss", "tech", "zh"),
    ("快科技", "https://www.mydrivers.com/rss", "tech", "zh"),
    ("游研社", "http://www.yystv.cn/rss/feed", "entertainment", "zh"),
    ("机核", "https://www.gcores.com/rss", "entertainment", "zh"),
    ("游戏葡萄", "http://youxiputao.com/feed", "entertainment", "zh"),
    ("阮一峰的网络日志", "http://www.ruanyifeng.com/blog/atom.xml", "tech", "zh"),
    ("小众软件", "http://feed.appinn.com/", "tech", "zh"),
    ("异次元软件世界", "http://feed.iplaysoft.com/", "tech", "zh"),
];
